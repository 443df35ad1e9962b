use assert_matches::assert_matches;
use proptest::prelude::*;
use rstest::rstest;

use super::*;

#[test]
fn default_value() {
    assert_eq!(FieldElement::default(), FieldElement::ZERO);
}

#[test]
fn modulus_reduces_to_zero() {
    assert_eq!(FieldElement::from_u256(FieldElement::modulus()), FieldElement::ZERO);
    assert_eq!(FieldElement::MAX + FieldElement::ONE, FieldElement::ZERO);
    assert_eq!(FieldElement::ZERO - FieldElement::ONE, FieldElement::MAX);
}

#[rstest]
#[case("0x0", FieldElement::ZERO)]
#[case("0x1", FieldElement::ONE)]
#[case("2", FieldElement::TWO)]
#[case("0x0000000000000000000000000000000000000000000000000000000000000003", FieldElement::THREE)]
#[case("0X10", FieldElement::from(16u8))]
fn from_hex_be(#[case] input: &str, #[case] expected: FieldElement) {
    assert_eq!(FieldElement::from_hex_be(input).unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("0x")]
#[case("0xföífg")]
#[case("0xzz")]
#[case("0x01dbc98a49405a81587a9608c9c0b9fd51d65b55b0bf428bad499ab76c7b46d19722")]
fn from_hex_be_rejects_invalid_input(#[case] input: &str) {
    assert_matches!(FieldElement::from_hex_be(input), Err(FeltError::InvalidEncoding(_)));
}

#[test]
fn hex_round_trip() {
    let felt =
        FieldElement::from_hex_be("0x01dbc98a49405a81587a9608c9c0b9fd51d65b55b0bf428bad499ab76c7b46d1").unwrap();
    assert_eq!(felt.to_hex_string(), "0x1dbc98a49405a81587a9608c9c0b9fd51d65b55b0bf428bad499ab76c7b46d1");
    assert_eq!(
        felt.to_fixed_hex_string(),
        "0x01dbc98a49405a81587a9608c9c0b9fd51d65b55b0bf428bad499ab76c7b46d1"
    );
    assert_eq!(FieldElement::from_hex_be(&felt.to_string()).unwrap(), felt);
    assert_eq!(format!("{felt:x}"), "1dbc98a49405a81587a9608c9c0b9fd51d65b55b0bf428bad499ab76c7b46d1");
    assert_eq!(FieldElement::ZERO.to_string(), "0x0");
}

#[test]
fn from_dec_str() {
    assert_eq!(FieldElement::from_dec_str("1").unwrap(), FieldElement::ONE);
    assert_eq!("1991991".parse::<FieldElement>().unwrap(), FieldElement::from(1991991u64));
    assert_matches!(FieldElement::from_dec_str(""), Err(FeltError::InvalidEncoding(_)));
    assert_matches!(FieldElement::from_dec_str("12a"), Err(FeltError::InvalidEncoding(_)));
}

#[test]
fn byte_views_are_zero_padded() {
    let felt = FieldElement::from(0x0102u16);
    let be = felt.to_bytes_be();
    let le = felt.to_bytes_le();
    assert_eq!(&be[30..], &[0x01, 0x02]);
    assert!(be[..30].iter().all(|b| *b == 0));
    assert_eq!(&le[..2], &[0x02, 0x01]);
    assert!(le[2..].iter().all(|b| *b == 0));
    assert_eq!(FieldElement::from_bytes_be(&be), felt);
    assert_eq!(FieldElement::from_bytes_le(&le), felt);
}

#[test]
fn byte_slice_longer_than_32_bytes_is_rejected() {
    assert_matches!(
        FieldElement::from_byte_slice_be(&[1u8; 33]),
        Err(FeltError::InputTooLong { max: 32, actual: 33 })
    );
}

#[test]
fn arithmetic() {
    let a = FieldElement::from(7u8);
    let b = FieldElement::from(5u8);
    assert_eq!(a + b, FieldElement::from(12u8));
    assert_eq!(a - b, FieldElement::TWO);
    assert_eq!(b - a, -FieldElement::TWO);
    assert_eq!(a * b, FieldElement::from(35u8));
    assert_eq!(FieldElement::MAX * FieldElement::MAX, FieldElement::ONE);
    assert_eq!(FieldElement::TWO.pow(U256::from(10u8)), FieldElement::from(1024u16));
}

#[test]
fn division() {
    let a = FieldElement::from(35u8);
    let b = FieldElement::from(5u8);
    assert_eq!(a.checked_div(&b).unwrap(), FieldElement::from(7u8));

    let third = FieldElement::ONE.checked_div(&FieldElement::THREE).unwrap();
    assert_eq!(third * FieldElement::THREE, FieldElement::ONE);

    assert_matches!(a.checked_div(&FieldElement::ZERO), Err(FeltError::DivisionByZero));
    let reduced_zero = FieldElement::from_u256(FieldElement::modulus());
    assert_matches!(a.checked_div(&reduced_zero), Err(FeltError::DivisionByZero));
}

#[test]
fn mod_floor() {
    let felt = FieldElement::from(1000u16);
    assert_eq!(felt.mod_floor(U256::from(7u8)).unwrap(), FieldElement::from(6u8));
    assert_matches!(felt.mod_floor(U256::zero()), Err(FeltError::DivisionByZero));
}

#[test]
fn short_strings() {
    let felt = FieldElement::from_short_string("SN_MAIN").unwrap();
    assert_eq!(felt, FieldElement::from_hex_be("0x534e5f4d41494e").unwrap());
    assert_eq!(felt.to_short_string().unwrap(), "SN_MAIN");
    assert_eq!(FieldElement::from_short_string("").unwrap(), FieldElement::ZERO);

    let max = "a".repeat(31);
    assert_eq!(FieldElement::from_short_string(&max).unwrap().to_short_string().unwrap(), max);

    assert_matches!(
        FieldElement::from_short_string(&"a".repeat(32)),
        Err(FeltError::InputTooLong { max: 31, actual: 32 })
    );
    assert_matches!(FieldElement::from_short_string("héllo"), Err(FeltError::InvalidEncoding(_)));
    assert_matches!(FieldElement::MAX.to_short_string(), Err(FeltError::InvalidEncoding(_)));
}

#[test]
fn integer_conversions() {
    assert_eq!(u64::try_from(FieldElement::from(42u64)).unwrap(), 42);
    assert_eq!(u8::try_from(FieldElement::from(255u64)).unwrap(), 255);
    assert_matches!(u8::try_from(FieldElement::from(256u64)), Err(FeltError::ValueTooLarge));
    assert_matches!(u128::try_from(FieldElement::MAX), Err(FeltError::ValueTooLarge));
    assert_eq!(FieldElement::from(true), FieldElement::ONE);

    let address = H160::repeat_byte(0xab);
    assert_eq!(H160::try_from(FieldElement::from(address)).unwrap(), address);
    assert_matches!(H160::try_from(FieldElement::MAX), Err(FeltError::ValueTooLarge));
}

#[test]
fn serde_hex_round_trip() {
    let felt = FieldElement::from(0xdeadbeefu32);
    let json = serde_json::to_string(&felt).unwrap();
    assert_eq!(json, "\"0xdeadbeef\"");
    assert_eq!(serde_json::from_str::<FieldElement>(&json).unwrap(), felt);
    assert_eq!(serde_json::from_str::<FieldElement>("\"3735928559\"").unwrap(), felt);
    assert_eq!(serde_json::from_str::<FieldElement>("3735928559").unwrap(), felt);
    assert!(serde_json::from_str::<FieldElement>("\"0xnothex\"").is_err());
}

fn arb_u256() -> impl Strategy<Value = U256> {
    prop::array::uniform32(any::<u8>()).prop_map(|bytes| U256::from_big_endian(&bytes))
}

proptest! {
    #[test]
    fn reduction_matches_integer_remainder(n in arb_u256()) {
        let felt = FieldElement::from_u256(n);
        prop_assert_eq!(felt.to_u256(), n % FieldElement::modulus());
        prop_assert_eq!(felt + FieldElement::from_u256(FieldElement::modulus()), felt);
    }

    #[test]
    fn division_inverts_multiplication(a in arb_u256(), b in arb_u256()) {
        let a = FieldElement::from_u256(a);
        let b = FieldElement::from_u256(b);
        prop_assume!(!b.is_zero());
        prop_assert_eq!((a * b).checked_div(&b).unwrap(), a);
        prop_assert_eq!(a - b + b, a);
    }
}
