use dp_felt::FieldElement;

use crate::{ByteArray, CairoCodecError, CairoType, CairoValue, FeltCodec, FeltReader, Result};

/// Serializes `value` as the flat felt sequence of `kind`.
pub fn encode(kind: &CairoType, value: &CairoValue) -> Result<Vec<FieldElement>> {
    let mut output = Vec::new();
    encode_to(kind, value, &mut output)?;
    Ok(output)
}

pub fn encode_to(kind: &CairoType, value: &CairoValue, output: &mut Vec<FieldElement>) -> Result<()> {
    match (kind, value) {
        (CairoType::Felt | CairoType::ContractAddress | CairoType::ClassHash, CairoValue::Felt(felt)) => {
            output.push(*felt)
        }
        (CairoType::EthAddress, CairoValue::Felt(felt)) => output.push(check_bits(kind, *felt, 160)?),
        (CairoType::Bytes31, CairoValue::Felt(felt)) => output.push(check_bits(kind, *felt, 248)?),
        (CairoType::Bool, CairoValue::Bool(value)) => value.encode_to(output),
        (CairoType::Uint(bits), CairoValue::Uint(value)) => {
            if *bits < 128 && *value >> bits != 0 {
                return Err(CairoCodecError::ValueOutOfRange(kind.to_string()));
            }
            value.encode_to(output)
        }
        (CairoType::Int(bits), CairoValue::Int(value)) => {
            if !fits_signed(*value, *bits) {
                return Err(CairoCodecError::ValueOutOfRange(kind.to_string()));
            }
            output.push(int_to_felt(*value))
        }
        (CairoType::U256, CairoValue::U256(value)) => value.encode_to(output),
        (CairoType::ByteArray, CairoValue::ByteArray(bytes)) => ByteArray::from_bytes(bytes).encode_to(output),
        (CairoType::Array(inner), CairoValue::Array(items)) => {
            output.push(items.len().into());
            for item in items {
                encode_to(inner, item, output)?;
            }
        }
        (CairoType::Option(inner), CairoValue::Option(Some(item))) => {
            output.push(FieldElement::ZERO);
            encode_to(inner, item, output)?;
        }
        (CairoType::Option(_), CairoValue::Option(None)) => output.push(FieldElement::ONE),
        (CairoType::Result(ok, err), CairoValue::Enum { index, payload }) => {
            let variant = match index {
                0 => ok,
                1 => err,
                _ => return Err(invalid_discriminant(kind, (*index).into())),
            };
            output.push((*index).into());
            encode_to(variant, payload, output)?;
        }
        (CairoType::Tuple(members), CairoValue::Tuple(items)) => {
            check_count(members.len(), items.len())?;
            for (member, item) in members.iter().zip(items) {
                encode_to(member, item, output)?;
            }
        }
        (CairoType::Struct { members, .. }, CairoValue::Struct(fields)) => {
            check_count(members.len(), fields.len())?;
            for (member, (name, field)) in members.iter().zip(fields) {
                if member.name != *name {
                    return Err(CairoCodecError::TypeMismatch {
                        expected: format!("member {} of {kind}", member.name),
                        actual: "misnamed struct member",
                    });
                }
                encode_to(&member.kind, field, output)?;
            }
        }
        (CairoType::Enum { variants, .. }, CairoValue::Enum { index, payload }) => {
            let variant = variants.get(*index).ok_or_else(|| invalid_discriminant(kind, (*index).into()))?;
            output.push((*index).into());
            encode_to(&variant.kind, payload, output)?;
        }
        _ => return Err(CairoCodecError::TypeMismatch { expected: kind.to_string(), actual: value.kind() }),
    }
    Ok(())
}

/// Decodes one value of `kind` from the start of `data`.
///
/// Returns the value together with the number of felts it occupied.
pub fn decode(kind: &CairoType, data: &[FieldElement]) -> Result<(CairoValue, usize)> {
    let mut reader = FeltReader::new(data);
    let value = decode_from(kind, &mut reader)?;
    Ok((value, reader.offset()))
}

pub fn decode_from(kind: &CairoType, input: &mut FeltReader) -> Result<CairoValue> {
    let value = match kind {
        CairoType::Felt | CairoType::ContractAddress | CairoType::ClassHash => CairoValue::Felt(input.read()?),
        CairoType::EthAddress => CairoValue::Felt(check_bits(kind, input.read()?, 160)?),
        CairoType::Bytes31 => CairoValue::Felt(check_bits(kind, input.read()?, 248)?),
        CairoType::Bool => CairoValue::Bool(bool::decode(input)?),
        CairoType::Uint(bits) => {
            let value: u128 =
                input.read()?.try_into().map_err(|_| CairoCodecError::ValueOutOfRange(kind.to_string()))?;
            if *bits < 128 && value >> bits != 0 {
                return Err(CairoCodecError::ValueOutOfRange(kind.to_string()));
            }
            CairoValue::Uint(value)
        }
        CairoType::Int(bits) => CairoValue::Int(felt_to_int(input.read()?, *bits).ok_or_else(|| {
            CairoCodecError::ValueOutOfRange(kind.to_string())
        })?),
        CairoType::U256 => CairoValue::U256(FeltCodec::decode(input)?),
        CairoType::ByteArray => CairoValue::ByteArray(ByteArray::decode(input)?.to_bytes()),
        CairoType::Array(inner) => {
            let len = input.read_len(inner.min_size().max(1))?;
            let items = (0..len).map(|_| decode_from(inner, input)).collect::<Result<Vec<_>>>()?;
            CairoValue::Array(items)
        }
        CairoType::Option(inner) => match input.read()? {
            tag if tag == FieldElement::ZERO => CairoValue::some(decode_from(inner, input)?),
            tag if tag == FieldElement::ONE => CairoValue::none(),
            tag => return Err(invalid_discriminant(kind, tag)),
        },
        CairoType::Result(ok, err) => match input.read()? {
            tag if tag == FieldElement::ZERO => CairoValue::variant(0, decode_from(ok, input)?),
            tag if tag == FieldElement::ONE => CairoValue::variant(1, decode_from(err, input)?),
            tag => return Err(invalid_discriminant(kind, tag)),
        },
        CairoType::Tuple(members) => {
            CairoValue::Tuple(members.iter().map(|member| decode_from(member, input)).collect::<Result<Vec<_>>>()?)
        }
        CairoType::Struct { members, .. } => CairoValue::Struct(
            members
                .iter()
                .map(|member| -> Result<(String, CairoValue)> { Ok((member.name.clone(), decode_from(&member.kind, input)?)) })
                .collect::<Result<Vec<_>>>()?,
        ),
        CairoType::Enum { variants, .. } => {
            let tag = input.read()?;
            let (index, variant) = usize::try_from(tag)
                .ok()
                .and_then(|index| variants.get(index).map(|variant| (index, variant)))
                .ok_or_else(|| invalid_discriminant(kind, tag))?;
            CairoValue::variant(index, decode_from(&variant.kind, input)?)
        }
    };
    Ok(value)
}

/// Decodes a value of each type in order and requires the whole input to be consumed.
pub(crate) fn decode_exact<'a>(
    kinds: impl IntoIterator<Item = &'a CairoType>,
    data: &[FieldElement],
) -> Result<Vec<CairoValue>> {
    let mut reader = FeltReader::new(data);
    let values = kinds.into_iter().map(|kind| decode_from(kind, &mut reader)).collect::<Result<Vec<_>>>()?;
    if reader.remaining_len() > 0 {
        return Err(CairoCodecError::TrailingData { consumed: reader.offset(), remaining: reader.remaining_len() });
    }
    Ok(values)
}

fn check_bits(kind: &CairoType, felt: FieldElement, bits: usize) -> Result<FieldElement> {
    if felt.bits() > bits {
        return Err(CairoCodecError::ValueOutOfRange(kind.to_string()));
    }
    Ok(felt)
}

fn check_count(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(CairoCodecError::ArgumentCountMismatch { expected, actual });
    }
    Ok(())
}

fn invalid_discriminant(kind: &CairoType, value: FieldElement) -> CairoCodecError {
    log::debug!("[cairo-codec] invalid discriminant {value} for {kind}");
    CairoCodecError::InvalidDiscriminant { kind: kind.to_string(), value }
}

fn fits_signed(value: i128, bits: usize) -> bool {
    if bits >= 128 {
        return true;
    }
    let limit = 1i128 << (bits - 1);
    (-limit..limit).contains(&value)
}

/// Negative values are stored as `P - |value|`.
pub(crate) fn int_to_felt(value: i128) -> FieldElement {
    let magnitude = FieldElement::from(value.unsigned_abs());
    if value < 0 { -magnitude } else { magnitude }
}

pub(crate) fn felt_to_int(felt: FieldElement, bits: usize) -> Option<i128> {
    let limit = 1u128 << (bits - 1);
    if let Ok(magnitude) = u128::try_from(felt) {
        return (magnitude < limit).then_some(magnitude as i128);
    }
    let magnitude = u128::try_from(-felt).ok()?;
    (magnitude <= limit).then_some((magnitude as i128).wrapping_neg())
}
