use dp_felt::{FieldElement, U256};

use crate::{CairoCodecError, FeltReader, Result};

/// Statically typed counterpart of [`encode`](crate::encode) and [`decode`](crate::decode)
/// for Rust types with a fixed Cairo layout.
pub trait FeltCodec: Sized {
    /// Returns number of field elements required to encode the value
    fn size_in_felts(&self) -> usize;
    /// Encodes the value as felt array and appends to the output
    fn encode_to(&self, output: &mut Vec<FieldElement>);
    /// Tries to decode a value given a felt reader instance
    fn decode(input: &mut FeltReader) -> Result<Self>;
    /// Converts the value into an array of field elements
    fn to_encoded_vec(&self) -> Vec<FieldElement> {
        let mut output = Vec::with_capacity(self.size_in_felts());
        self.encode_to(&mut output);
        output
    }
}

impl FeltCodec for FieldElement {
    fn size_in_felts(&self) -> usize {
        1
    }

    fn encode_to(&self, output: &mut Vec<FieldElement>) {
        output.push(*self);
    }

    fn decode(input: &mut FeltReader) -> Result<Self> {
        input.read()
    }
}

impl FeltCodec for bool {
    fn size_in_felts(&self) -> usize {
        1
    }

    fn encode_to(&self, output: &mut Vec<FieldElement>) {
        output.push((*self).into());
    }

    fn decode(input: &mut FeltReader) -> Result<Self> {
        match input.read()? {
            value if value == FieldElement::ZERO => Ok(false),
            value if value == FieldElement::ONE => Ok(true),
            value => Err(CairoCodecError::InvalidDiscriminant { kind: "bool".to_string(), value }),
        }
    }
}

macro_rules! unsigned_felt_codec {
    ($($t:ty),+) => {
        $(
            impl FeltCodec for $t {
                fn size_in_felts(&self) -> usize {
                    1
                }

                fn encode_to(&self, output: &mut Vec<FieldElement>) {
                    output.push((*self).into());
                }

                fn decode(input: &mut FeltReader) -> Result<Self> {
                    input.read()?.try_into().map_err(|_| CairoCodecError::ValueOutOfRange(stringify!($t).to_string()))
                }
            }
        )+
    };
}

unsigned_felt_codec!(u8, u16, u32, u64, u128);

/// `u256` is a struct of two `u128` limbs, low first.
impl FeltCodec for U256 {
    fn size_in_felts(&self) -> usize {
        2
    }

    fn encode_to(&self, output: &mut Vec<FieldElement>) {
        output.push(self.low_u128().into());
        output.push((*self >> 128u32).low_u128().into());
    }

    fn decode(input: &mut FeltReader) -> Result<Self> {
        let out_of_range = |_| CairoCodecError::ValueOutOfRange("u256".to_string());
        let low: u128 = input.read()?.try_into().map_err(out_of_range)?;
        let high: u128 = input.read()?.try_into().map_err(out_of_range)?;
        Ok((U256::from(high) << 128u32) | U256::from(low))
    }
}

impl<T: FeltCodec> FeltCodec for Vec<T> {
    fn size_in_felts(&self) -> usize {
        1 + self.iter().map(FeltCodec::size_in_felts).sum::<usize>()
    }

    fn encode_to(&self, output: &mut Vec<FieldElement>) {
        output.push(self.len().into());
        for element in self {
            element.encode_to(output);
        }
    }

    fn decode(input: &mut FeltReader) -> Result<Self> {
        let len = input.read_len(1)?;
        (0..len).map(|_| T::decode(input)).collect()
    }
}

/// `Some` is variant 0, `None` is variant 1.
impl<T: FeltCodec> FeltCodec for Option<T> {
    fn size_in_felts(&self) -> usize {
        1 + self.as_ref().map_or(0, FeltCodec::size_in_felts)
    }

    fn encode_to(&self, output: &mut Vec<FieldElement>) {
        match self {
            Some(value) => {
                output.push(FieldElement::ZERO);
                value.encode_to(output);
            }
            None => output.push(FieldElement::ONE),
        }
    }

    fn decode(input: &mut FeltReader) -> Result<Self> {
        match input.read()? {
            value if value == FieldElement::ZERO => T::decode(input).map(Some),
            value if value == FieldElement::ONE => Ok(None),
            value => Err(CairoCodecError::InvalidDiscriminant { kind: "Option".to_string(), value }),
        }
    }
}
