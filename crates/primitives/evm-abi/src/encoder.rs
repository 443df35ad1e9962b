use primitive_types::U256;

use crate::token::{fits_signed, fits_unsigned};
use crate::{AbiError, ParamType, Token, WORD_SIZE};

/// Encodes `tokens` as the head/tail sequence described by `types`.
pub fn encode(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, AbiError> {
    if types.len() != tokens.len() {
        return Err(AbiError::ArgumentCountMismatch { expected: types.len(), actual: tokens.len() });
    }
    let types: Vec<&ParamType> = types.iter().collect();
    encode_sequence(&types, tokens)
}

fn encode_sequence(types: &[&ParamType], tokens: &[Token]) -> Result<Vec<u8>, AbiError> {
    let head_len: usize = types.iter().map(|kind| kind.head_size()).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for (kind, token) in types.iter().zip(tokens) {
        if kind.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            tail.extend(encode_value(kind, token)?);
        } else {
            head.extend(encode_value(kind, token)?);
        }
    }

    head.extend(tail);
    Ok(head)
}

fn encode_value(kind: &ParamType, token: &Token) -> Result<Vec<u8>, AbiError> {
    match (kind, token) {
        (ParamType::Address, Token::Address(address)) => {
            let mut word = [0u8; WORD_SIZE];
            word[12..].copy_from_slice(address.as_bytes());
            Ok(word.to_vec())
        }
        (ParamType::Bool, Token::Bool(value)) => Ok(u256_word(&U256::from(*value as u8)).to_vec()),
        (ParamType::Uint(bits), Token::Uint(value)) => {
            if !fits_unsigned(value, *bits) {
                return Err(AbiError::ValueOutOfRange(kind.to_string()));
            }
            Ok(u256_word(value).to_vec())
        }
        (ParamType::Int(bits), Token::Int(value)) => {
            if !fits_signed(value, *bits) {
                return Err(AbiError::ValueOutOfRange(kind.to_string()));
            }
            Ok(u256_word(value).to_vec())
        }
        (ParamType::FixedBytes(len), Token::FixedBytes(bytes)) => {
            if bytes.len() != *len {
                return Err(AbiError::ValueOutOfRange(kind.to_string()));
            }
            Ok(right_padded(bytes))
        }
        (ParamType::Bytes, Token::Bytes(bytes)) => Ok(length_prefixed(bytes)),
        (ParamType::String, Token::String(value)) => Ok(length_prefixed(value.as_bytes())),
        (ParamType::Array(inner), Token::Array(items)) => {
            let types = vec![inner.as_ref(); items.len()];
            let mut out = usize_word(items.len()).to_vec();
            out.extend(encode_sequence(&types, items)?);
            Ok(out)
        }
        (ParamType::FixedArray(inner, len), Token::FixedArray(items)) => {
            if items.len() != *len {
                return Err(AbiError::ArgumentCountMismatch { expected: *len, actual: items.len() });
            }
            let types = vec![inner.as_ref(); items.len()];
            encode_sequence(&types, items)
        }
        (ParamType::Tuple(members), Token::Tuple(items)) => {
            if items.len() != members.len() {
                return Err(AbiError::ArgumentCountMismatch { expected: members.len(), actual: items.len() });
            }
            let types: Vec<&ParamType> = members.iter().collect();
            encode_sequence(&types, items)
        }
        _ => Err(AbiError::TypeMismatch { expected: kind.to_string(), actual: token.kind() }),
    }
}

/// In-place encoding used for hashed event topics: every element padded to a
/// word, no offsets and no length prefixes.
pub(crate) fn encode_topic_preimage(kind: &ParamType, token: &Token) -> Result<Vec<u8>, AbiError> {
    match (kind, token) {
        (ParamType::Bytes, Token::Bytes(bytes)) => Ok(right_padded(bytes)),
        (ParamType::String, Token::String(value)) => Ok(right_padded(value.as_bytes())),
        (ParamType::Array(inner), Token::Array(items)) | (ParamType::FixedArray(inner, _), Token::FixedArray(items)) => {
            if let ParamType::FixedArray(_, len) = kind {
                if items.len() != *len {
                    return Err(AbiError::ArgumentCountMismatch { expected: *len, actual: items.len() });
                }
            }
            let mut out = Vec::new();
            for item in items {
                out.extend(encode_topic_preimage(inner, item)?);
            }
            Ok(out)
        }
        (ParamType::Tuple(members), Token::Tuple(items)) => {
            if items.len() != members.len() {
                return Err(AbiError::ArgumentCountMismatch { expected: members.len(), actual: items.len() });
            }
            let mut out = Vec::new();
            for (member, item) in members.iter().zip(items) {
                out.extend(encode_topic_preimage(member, item)?);
            }
            Ok(out)
        }
        _ => encode_value(kind, token),
    }
}

pub(crate) fn u256_word(value: &U256) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    value.to_big_endian(&mut word);
    word
}

fn usize_word(value: usize) -> [u8; WORD_SIZE] {
    u256_word(&U256::from(value))
}

fn right_padded(bytes: &[u8]) -> Vec<u8> {
    let padded_len = bytes.len().div_ceil(WORD_SIZE) * WORD_SIZE;
    let mut out = bytes.to_vec();
    out.resize(padded_len, 0);
    out
}

fn length_prefixed(bytes: &[u8]) -> Vec<u8> {
    let mut out = usize_word(bytes.len()).to_vec();
    out.extend(right_padded(bytes));
    out
}
