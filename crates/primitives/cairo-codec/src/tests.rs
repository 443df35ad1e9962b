use assert_matches::assert_matches;
use dp_felt::{FieldElement, H160, U256};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::*;

fn felt(value: u128) -> FieldElement {
    FieldElement::from(value)
}

fn registry() -> TypeRegistry {
    TypeRegistry::new()
        .with_struct("demo::Point", &[("x", "core::integer::u64"), ("y", "core::integer::u64")])
        .with_enum("demo::Shape", &[("Dot", "demo::Point"), ("Segment", "(demo::Point, demo::Point)"), ("Empty", "()")])
}

#[rstest]
#[case("felt252", CairoType::Felt)]
#[case("core::felt252", CairoType::Felt)]
#[case("core::integer::u128", CairoType::Uint(128))]
#[case("i16", CairoType::Int(16))]
#[case("core::integer::u256", CairoType::U256)]
#[case("core::starknet::contract_address::ContractAddress", CairoType::ContractAddress)]
#[case("core::byte_array::ByteArray", CairoType::ByteArray)]
#[case("core::array::Array::<core::felt252>", CairoType::Array(Box::new(CairoType::Felt)))]
#[case("core::array::Span::<core::integer::u8>", CairoType::Array(Box::new(CairoType::Uint(8))))]
#[case("Array<Array<bool>>", CairoType::Array(Box::new(CairoType::Array(Box::new(CairoType::Bool)))))]
#[case("core::option::Option::<(u8, felt252)>", CairoType::Option(Box::new(CairoType::Tuple(vec![CairoType::Uint(8), CairoType::Felt]))))]
#[case("core::result::Result::<u8, felt252>", CairoType::Result(Box::new(CairoType::Uint(8)), Box::new(CairoType::Felt)))]
#[case("()", CairoType::Tuple(vec![]))]
#[case("(felt252,)", CairoType::Tuple(vec![CairoType::Felt]))]
#[case("core::zeroable::NonZero::<core::felt252>", CairoType::Felt)]
fn parses_builtin_types(#[case] name: &str, #[case] expected: CairoType) {
    assert_eq!(CairoType::parse(name, &TypeRegistry::new()).unwrap(), expected);
}

#[test]
fn resolves_registry_types() {
    let point = CairoType::Struct {
        name: "demo::Point".into(),
        members: vec![Member::new("x", CairoType::Uint(64)), Member::new("y", CairoType::Uint(64))],
    };
    let shape = CairoType::parse("demo::Shape", &registry()).unwrap();
    assert_eq!(
        shape,
        CairoType::Enum {
            name: "demo::Shape".into(),
            variants: vec![
                Member::new("Dot", point.clone()),
                Member::new("Segment", CairoType::Tuple(vec![point.clone(), point])),
                Member::new("Empty", CairoType::Tuple(vec![])),
            ],
        }
    );
}

#[rstest]
#[case("Foo")]
#[case("other::integer::u8")]
#[case("Array<felt252, felt252>")]
#[case("Array<felt252")]
#[case("(felt252")]
#[case("HashMap<felt252>")]
fn rejects_unknown_types(#[case] name: &str) {
    assert_matches!(CairoType::parse(name, &registry()), Err(CairoCodecError::UnknownType(_)));
}

#[test]
fn rejects_cyclic_definitions() {
    let registry = TypeRegistry::new()
        .with_struct("demo::A", &[("b", "demo::B")])
        .with_struct("demo::B", &[("a", "core::option::Option::<demo::A>")])
        .with_struct("demo::Node", &[("children", "Array<demo::Node>")]);
    assert_matches!(CairoType::parse("demo::A", &registry), Err(CairoCodecError::UnknownType(name)) if name == "demo::A");
    assert_matches!(CairoType::parse("demo::Node", &registry), Err(CairoCodecError::UnknownType(_)));
}

#[test]
fn shared_types_are_not_cycles() {
    let kind = CairoType::parse("(demo::Point, demo::Point)", &registry()).unwrap();
    assert_matches!(kind, CairoType::Tuple(members) if members.len() == 2);
}

#[test]
fn encodes_u256_low_limb_first() {
    let value = (U256::one() << 128u32) + U256::from(5u8);
    assert_eq!(encode(&CairoType::U256, &CairoValue::U256(value)).unwrap(), vec![felt(5), felt(1)]);
}

#[test]
fn encodes_short_byte_array() {
    let encoded = encode(&CairoType::ByteArray, &CairoValue::string("hello")).unwrap();
    assert_eq!(encoded, vec![felt(0), FieldElement::from_hex_be("0x68656c6c6f").unwrap(), felt(5)]);
}

#[test]
fn encodes_full_byte_array_words() {
    let text = "abcdefghijklmnopqrstuvwxyz01234";
    assert_eq!(text.len(), BYTES_PER_WORD);
    let encoded = encode(&CairoType::ByteArray, &CairoValue::string(&format!("{text}!"))).unwrap();
    let word = FieldElement::from_hex_be(&hex_of(text)).unwrap();
    assert_eq!(encoded, vec![felt(1), word, felt(b'!' as u128), felt(1)]);

    let (byte_array, consumed) = ByteArray::from_felts(&encoded).unwrap();
    assert_eq!(consumed, 4);
    assert_eq!(byte_array.to_bytes(), format!("{text}!").into_bytes());
    assert_eq!(byte_array.to_felts(), encoded);
}

fn hex_of(text: &str) -> String {
    text.bytes().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn encodes_containers() {
    let kind = CairoType::parse("Array<Option<u8>>", &TypeRegistry::new()).unwrap();
    let value = CairoValue::Array(vec![CairoValue::some(CairoValue::Uint(7)), CairoValue::none()]);
    let encoded = encode(&kind, &value).unwrap();
    assert_eq!(encoded, vec![felt(2), felt(0), felt(7), felt(1)]);
    assert_eq!(decode(&kind, &encoded).unwrap(), (value, 4));
}

#[test]
fn encodes_enums_with_index_and_payload() {
    let kind = CairoType::parse("demo::Shape", &registry()).unwrap();
    let point = |x, y| CairoValue::Struct(vec![("x".into(), CairoValue::Uint(x)), ("y".into(), CairoValue::Uint(y))]);

    let segment = CairoValue::variant(1, CairoValue::Tuple(vec![point(1, 2), point(3, 4)]));
    assert_eq!(encode(&kind, &segment).unwrap(), vec![felt(1), felt(1), felt(2), felt(3), felt(4)]);

    let empty = CairoValue::variant(2, CairoValue::unit());
    assert_eq!(encode(&kind, &empty).unwrap(), vec![felt(2)]);
    assert_eq!(decode(&kind, &[felt(2), felt(99)]).unwrap(), (empty, 1));
}

#[test]
fn encodes_negative_integers_as_field_negation() {
    assert_eq!(encode(&CairoType::Int(8), &CairoValue::Int(-1)).unwrap(), vec![FieldElement::MAX]);
    assert_eq!(decode(&CairoType::Int(8), &[FieldElement::MAX]).unwrap(), (CairoValue::Int(-1), 1));
    assert_eq!(decode(&CairoType::Int(128), &[-felt(1u128 << 127)]).unwrap(), (CairoValue::Int(i128::MIN), 1));
    assert_matches!(encode(&CairoType::Int(8), &CairoValue::Int(128)), Err(CairoCodecError::ValueOutOfRange(_)));
    assert_matches!(decode(&CairoType::Int(8), &[-felt(129)]), Err(CairoCodecError::ValueOutOfRange(_)));
}

#[test]
fn encoding_checks_widths_and_shapes() {
    assert_matches!(encode(&CairoType::Uint(8), &CairoValue::Uint(256)), Err(CairoCodecError::ValueOutOfRange(_)));
    assert_matches!(
        encode(&CairoType::EthAddress, &CairoValue::Felt(FieldElement::from(U256::one() << 160u32))),
        Err(CairoCodecError::ValueOutOfRange(_))
    );
    assert_matches!(encode(&CairoType::Felt, &CairoValue::Bool(true)), Err(CairoCodecError::TypeMismatch { actual: "bool", .. }));
    assert_matches!(
        encode(&CairoType::Tuple(vec![CairoType::Felt]), &CairoValue::unit()),
        Err(CairoCodecError::ArgumentCountMismatch { expected: 1, actual: 0 })
    );
    let kind = CairoType::parse("demo::Shape", &registry()).unwrap();
    assert_matches!(
        encode(&kind, &CairoValue::variant(3, CairoValue::unit())),
        Err(CairoCodecError::InvalidDiscriminant { .. })
    );
}

#[rstest]
#[case::missing_felt(CairoType::Felt, vec![])]
#[case::missing_u256_limb(CairoType::U256, vec![1])]
#[case::array_longer_than_buffer(CairoType::Array(Box::new(CairoType::Felt)), vec![3, 1, 2])]
#[case::missing_option_payload(CairoType::Option(Box::new(CairoType::Felt)), vec![0])]
#[case::missing_pending_word(CairoType::ByteArray, vec![0])]
fn decoding_past_the_end_underruns(#[case] kind: CairoType, #[case] data: Vec<u128>) {
    let data: Vec<FieldElement> = data.into_iter().map(felt).collect();
    assert_matches!(decode(&kind, &data), Err(CairoCodecError::BufferUnderrun { .. }));
}

#[rstest]
#[case::bool(CairoType::Bool, 2)]
#[case::option(CairoType::Option(Box::new(CairoType::Felt)), 5)]
#[case::result(CairoType::Result(Box::new(CairoType::Felt), Box::new(CairoType::Felt)), 2)]
fn decoding_bad_tags_is_invalid_discriminant(#[case] kind: CairoType, #[case] tag: u128) {
    assert_matches!(decode(&kind, &[felt(tag), felt(0)]), Err(CairoCodecError::InvalidDiscriminant { value, .. }) if value == felt(tag));
}

#[test]
fn decoding_enum_index_out_of_range() {
    let kind = CairoType::parse("demo::Shape", &registry()).unwrap();
    assert_matches!(decode(&kind, &[felt(3)]), Err(CairoCodecError::InvalidDiscriminant { .. }));
}

#[test]
fn decoding_checks_widths() {
    assert_matches!(decode(&CairoType::Uint(8), &[felt(256)]), Err(CairoCodecError::ValueOutOfRange(_)));
    assert_matches!(decode(&CairoType::U256, &[FieldElement::MAX, felt(0)]), Err(CairoCodecError::ValueOutOfRange(_)));
    assert_matches!(decode(&CairoType::ByteArray, &[felt(0), felt(0x6869), felt(1)]), Err(CairoCodecError::ValueOutOfRange(_)));
    assert_matches!(decode(&CairoType::ByteArray, &[felt(0), felt(0), felt(31)]), Err(CairoCodecError::ValueOutOfRange(_)));
}

fn transfer() -> CairoFunction {
    CairoFunction::new(
        "transfer",
        vec![Member::new("recipient", CairoType::ContractAddress), Member::new("amount", CairoType::U256)],
        vec![CairoType::Bool],
    )
}

#[test]
fn function_calldata() {
    let function = transfer();
    assert_eq!(
        function.selector(),
        FieldElement::from_hex_be("0x83afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e").unwrap()
    );

    let arguments = vec![CairoValue::Felt(felt(0xabc)), CairoValue::U256(U256::from(1000u64))];
    let calldata = function.encode_inputs(&arguments).unwrap();
    assert_eq!(calldata, vec![felt(0xabc), felt(1000), felt(0)]);
    assert_eq!(function.decode_inputs(&calldata).unwrap(), arguments);

    assert_matches!(
        function.encode_inputs(&arguments[..1]),
        Err(CairoCodecError::ArgumentCountMismatch { expected: 2, actual: 1 })
    );
}

#[test]
fn function_outputs_must_be_consumed() {
    let function = transfer();
    assert_eq!(function.decode_outputs(&[felt(1)]).unwrap(), vec![CairoValue::Bool(true)]);
    assert_matches!(
        function.decode_outputs(&[felt(1), felt(1)]),
        Err(CairoCodecError::TrailingData { consumed: 1, remaining: 1 })
    );
}

#[test]
fn event_decoding() {
    let event = CairoEvent::new(
        "openzeppelin::token::erc20::ERC20::Transfer",
        vec![Member::new("from", CairoType::ContractAddress), Member::new("to", CairoType::ContractAddress)],
        vec![Member::new("value", CairoType::U256)],
    );
    assert_eq!(event.selector(), dp_hashers::starknet_keccak(b"Transfer"));

    let keys = vec![event.selector(), felt(1), felt(2)];
    let decoded = event.decode(&keys, &[felt(10), felt(0)]).unwrap();
    assert_eq!(
        decoded,
        vec![
            ("from".to_string(), CairoValue::Felt(felt(1))),
            ("to".to_string(), CairoValue::Felt(felt(2))),
            ("value".to_string(), CairoValue::U256(U256::from(10u8))),
        ]
    );

    assert_matches!(event.decode(&[felt(1), felt(1), felt(2)], &[]), Err(CairoCodecError::EventSelectorMismatch(_)));
    assert_matches!(event.decode(&[], &[]), Err(CairoCodecError::BufferUnderrun { .. }));
}

#[test]
fn contract_lookups() {
    let contract = CairoContract::new(vec![transfer()], vec![CairoEvent::new("Approval", vec![], vec![])]);
    assert_eq!(contract.function("transfer"), Some(&transfer()));
    assert_eq!(contract.function_by_selector(&transfer().selector()), Some(&transfer()));
    assert!(contract.event("Approval").is_some());
    assert!(contract.event_by_selector(&dp_hashers::starknet_keccak(b"Approval")).is_some());
    assert!(contract.function("approve").is_none());
}

#[test]
fn felt_codec_containers() {
    let values: Vec<Option<u64>> = vec![Some(3), None];
    let encoded = values.to_encoded_vec();
    assert_eq!(encoded, vec![felt(2), felt(0), felt(3), felt(1)]);
    assert_eq!(encoded.len(), values.size_in_felts());

    let mut reader = FeltReader::new(&encoded);
    assert_eq!(Vec::<Option<u64>>::decode(&mut reader).unwrap(), values);
    assert_eq!(reader.remaining_len(), 0);
}

fn arb_type() -> impl Strategy<Value = CairoType> {
    let leaf = prop_oneof![
        Just(CairoType::Felt),
        Just(CairoType::Bool),
        prop::sample::select(vec![8usize, 16, 32, 64, 128]).prop_map(CairoType::Uint),
        prop::sample::select(vec![8usize, 16, 32, 64, 128]).prop_map(CairoType::Int),
        Just(CairoType::U256),
        Just(CairoType::ContractAddress),
        Just(CairoType::EthAddress),
        Just(CairoType::Bytes31),
        Just(CairoType::ByteArray),
    ];
    leaf.prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|kind| CairoType::Array(Box::new(kind))),
            inner.clone().prop_map(|kind| CairoType::Option(Box::new(kind))),
            (inner.clone(), inner.clone()).prop_map(|(ok, err)| CairoType::Result(Box::new(ok), Box::new(err))),
            prop::collection::vec(inner.clone(), 0..3).prop_map(CairoType::Tuple),
            prop::collection::vec(inner.clone(), 1..3).prop_map(|kinds| CairoType::Struct {
                name: "demo::S".into(),
                members: kinds.into_iter().enumerate().map(|(i, kind)| Member::new(format!("m{i}"), kind)).collect(),
            }),
            prop::collection::vec(inner, 1..3).prop_map(|kinds| CairoType::Enum {
                name: "demo::E".into(),
                variants: kinds.into_iter().enumerate().map(|(i, kind)| Member::new(format!("V{i}"), kind)).collect(),
            }),
        ]
    })
}

fn padded_felt(bytes: &[u8]) -> FieldElement {
    let mut buffer = [0u8; 32];
    buffer[32 - bytes.len()..].copy_from_slice(bytes);
    FieldElement::from_bytes_be(&buffer)
}

fn arb_value(kind: &CairoType) -> BoxedStrategy<CairoValue> {
    match kind {
        CairoType::Felt | CairoType::ContractAddress | CairoType::ClassHash => {
            any::<[u8; 32]>().prop_map(|bytes| CairoValue::Felt(FieldElement::from_bytes_be(&bytes))).boxed()
        }
        CairoType::EthAddress => any::<[u8; 20]>().prop_map(|bytes| CairoValue::Felt(H160(bytes).into())).boxed(),
        CairoType::Bytes31 => any::<[u8; 31]>().prop_map(|bytes| CairoValue::Felt(padded_felt(&bytes))).boxed(),
        CairoType::Bool => any::<bool>().prop_map(CairoValue::Bool).boxed(),
        CairoType::Uint(bits) => {
            let shift = 128 - *bits as u32;
            any::<u128>().prop_map(move |value| CairoValue::Uint(value.checked_shr(shift).unwrap_or(0))).boxed()
        }
        CairoType::Int(bits) => {
            let shift = 128 - *bits as u32;
            any::<i128>().prop_map(move |value| CairoValue::Int(value >> shift)).boxed()
        }
        CairoType::U256 => any::<[u8; 32]>().prop_map(|bytes| CairoValue::U256(U256::from_big_endian(&bytes))).boxed(),
        CairoType::ByteArray => prop::collection::vec(any::<u8>(), 0..80).prop_map(CairoValue::ByteArray).boxed(),
        CairoType::Array(inner) => prop::collection::vec(arb_value(inner), 0..4).prop_map(CairoValue::Array).boxed(),
        CairoType::Option(inner) => prop_oneof![Just(CairoValue::none()), arb_value(inner).prop_map(CairoValue::some)].boxed(),
        CairoType::Result(ok, err) => prop_oneof![
            arb_value(ok).prop_map(|value| CairoValue::variant(0, value)),
            arb_value(err).prop_map(|value| CairoValue::variant(1, value)),
        ]
        .boxed(),
        CairoType::Tuple(members) => members.iter().map(arb_value).collect::<Vec<_>>().prop_map(CairoValue::Tuple).boxed(),
        CairoType::Struct { members, .. } => members
            .iter()
            .map(|member| {
                let name = member.name.clone();
                arb_value(&member.kind).prop_map(move |value| (name.clone(), value)).boxed()
            })
            .collect::<Vec<_>>()
            .prop_map(CairoValue::Struct)
            .boxed(),
        CairoType::Enum { variants, .. } => {
            let variants = variants.clone();
            (0..variants.len())
                .prop_flat_map(move |index| arb_value(&variants[index].kind).prop_map(move |value| CairoValue::variant(index, value)))
                .boxed()
        }
    }
}

proptest! {
    #[test]
    fn decode_inverts_encode((kind, value) in arb_type().prop_flat_map(|kind| {
        let value = arb_value(&kind);
        (Just(kind), value)
    })) {
        let encoded = encode(&kind, &value).unwrap();
        prop_assert_eq!(decode(&kind, &encoded).unwrap(), (value, encoded.len()));
    }

    #[test]
    fn byte_array_survives_felts(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        let byte_array = ByteArray::from_bytes(&bytes);
        let felts = byte_array.to_felts();
        prop_assert_eq!(felts.len(), 3 + bytes.len() / BYTES_PER_WORD);
        prop_assert_eq!(ByteArray::from_felts(&felts).unwrap(), (byte_array, felts.len()));
    }

    #[test]
    fn arbitrary_input_never_panics(kind in arb_type(), data in prop::collection::vec(any::<u64>(), 0..32)) {
        let data: Vec<FieldElement> = data.into_iter().map(FieldElement::from).collect();
        let _ = decode(&kind, &data);
    }
}
