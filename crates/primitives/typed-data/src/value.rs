//! Helpers reading message values out of JSON.

use primitive_types::U256;
use serde_json::{Map, Value};

use crate::{Result, TypedDataError};

/// Reads an integer given as a JSON number or as a decimal / `0x` hex string.
///
/// Returns the sign and the magnitude.
pub(crate) fn parse_integer(kind: &str, value: &Value) -> Result<(bool, U256)> {
    let parsed = match value {
        Value::Number(number) => match (number.as_u64(), number.as_i64()) {
            (Some(value), _) => Some((false, U256::from(value))),
            (None, Some(value)) => Some((value < 0, U256::from(value.unsigned_abs()))),
            _ => None,
        },
        Value::String(text) => {
            let text = text.trim();
            let (negative, digits) = match text.strip_prefix('-') {
                Some(digits) => (true, digits),
                None => (false, text),
            };
            let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
                Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16).ok(),
                Some(_) => None,
                None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                    U256::from_dec_str(digits).ok()
                }
                None => None,
            };
            magnitude.map(|magnitude| (negative && !magnitude.is_zero(), magnitude))
        }
        _ => None,
    };
    parsed.ok_or_else(|| TypedDataError::invalid_value(kind, value))
}

pub(crate) fn parse_bool(kind: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(value) => Ok(*value),
        Value::Number(number) if number.as_u64() == Some(0) => Ok(false),
        Value::Number(number) if number.as_u64() == Some(1) => Ok(true),
        Value::String(text) if text == "true" || text == "1" => Ok(true),
        Value::String(text) if text == "false" || text == "0" => Ok(false),
        _ => Err(TypedDataError::invalid_value(kind, value)),
    }
}

pub(crate) fn parse_hex_bytes(kind: &str, value: &Value) -> Result<Vec<u8>> {
    let text = value.as_str().ok_or_else(|| TypedDataError::invalid_value(kind, value))?;
    hex::decode(text.strip_prefix("0x").unwrap_or(text)).map_err(|_| TypedDataError::invalid_value(kind, value))
}

pub(crate) fn as_object<'a>(kind: &str, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| TypedDataError::invalid_value(kind, value))
}

pub(crate) fn as_array<'a>(kind: &str, value: &'a Value) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| TypedDataError::invalid_value(kind, value))
}

pub(crate) fn member<'a>(kind: &str, data: &'a Map<String, Value>, name: &str) -> Result<&'a Value> {
    data.get(name).ok_or_else(|| TypedDataError::MissingField { kind: kind.to_string(), field: name.to_string() })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!(42), false, 42u64)]
    #[case(json!(-7), true, 7u64)]
    #[case(json!("1000"), false, 1000u64)]
    #[case(json!("0x10"), false, 16u64)]
    #[case(json!("-0x10"), true, 16u64)]
    #[case(json!("-0"), false, 0u64)]
    fn integers(#[case] value: Value, #[case] negative: bool, #[case] magnitude: u64) {
        assert_eq!(parse_integer("uint", &value).unwrap(), (negative, U256::from(magnitude)));
    }

    #[rstest]
    #[case(json!(1.5))]
    #[case(json!("0x"))]
    #[case(json!("12ab"))]
    #[case(json!(""))]
    #[case(json!(null))]
    fn invalid_integers(#[case] value: Value) {
        assert_matches!(parse_integer("uint", &value), Err(TypedDataError::InvalidValue { .. }));
    }

    #[test]
    fn missing_member() {
        let data = json!({ "a": 1 });
        assert_matches!(
            member("Thing", data.as_object().unwrap(), "b"),
            Err(TypedDataError::MissingField { kind, field }) if kind == "Thing" && field == "b"
        );
    }
}
