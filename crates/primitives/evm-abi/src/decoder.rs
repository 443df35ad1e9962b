use primitive_types::{H160, U256};

use crate::token::{fits_signed, fits_unsigned};
use crate::{AbiError, ParamType, Token, WORD_SIZE};

/// Decodes the head/tail sequence described by `types`.
///
/// Every offset and length is checked against the buffer before it is followed, and the
/// decoder never reads more words than the buffer holds.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    let types: Vec<&ParamType> = types.iter().collect();
    let mut budget = WordBudget::for_buffer(data);
    decode_sequence(&types, data, 0, &mut budget)
}

/// Decodes an elementary value from a single indexed topic.
pub(crate) fn decode_word(kind: &ParamType, word: &[u8]) -> Result<Token, AbiError> {
    decode_value(kind, word, 0, &mut WordBudget::for_buffer(word))
}

/// Words the decoder may still read.
///
/// A well formed encoding reads each of its words once. Tails whose offsets alias an
/// already decoded region read the same words again and run out of budget, so the output
/// stays linear in the input.
struct WordBudget(usize);

impl WordBudget {
    fn for_buffer(data: &[u8]) -> Self {
        Self(data.len().div_ceil(WORD_SIZE))
    }

    fn charge(&mut self, words: usize, at: usize) -> Result<(), AbiError> {
        match self.0.checked_sub(words) {
            Some(left) => {
                self.0 = left;
                Ok(())
            }
            None => {
                log::debug!("[evm-abi] decoding at offset {at} reads past the word budget");
                Err(AbiError::MalformedEncoding(format!("data at offset {at} is decoded more than once")))
            }
        }
    }
}

fn decode_sequence(
    types: &[&ParamType],
    data: &[u8],
    base: usize,
    budget: &mut WordBudget,
) -> Result<Vec<Token>, AbiError> {
    let mut cursor = base;
    let mut tokens = Vec::with_capacity(types.len());

    for kind in types {
        if kind.is_dynamic() {
            let offset = read_usize(data, cursor)?;
            budget.charge(1, cursor)?;
            let start = base.checked_add(offset).ok_or(AbiError::BufferUnderrun { offset: base, needed: offset })?;
            tokens.push(decode_value(kind, data, start, budget)?);
            cursor += WORD_SIZE;
        } else {
            tokens.push(decode_value(kind, data, cursor, budget)?);
            cursor += kind.head_size();
        }
    }

    Ok(tokens)
}

fn decode_value(kind: &ParamType, data: &[u8], at: usize, budget: &mut WordBudget) -> Result<Token, AbiError> {
    match kind {
        ParamType::Address | ParamType::Bool | ParamType::Uint(_) | ParamType::Int(_) | ParamType::FixedBytes(_) => {
            budget.charge(1, at)?;
            decode_elementary(kind, data, at)
        }
        ParamType::Bytes => Ok(Token::Bytes(read_length_prefixed(data, at, budget)?.to_vec())),
        ParamType::String => {
            let bytes = read_length_prefixed(data, at, budget)?;
            let value = String::from_utf8(bytes.to_vec())
                .map_err(|_| AbiError::MalformedEncoding(format!("invalid UTF-8 string at offset {at}")))?;
            Ok(Token::String(value))
        }
        ParamType::Array(inner) => {
            let len = read_usize(data, at)?;
            budget.charge(1, at)?;
            let start = at + WORD_SIZE;
            ensure_room(data, start, inner, len)?;
            let types = vec![inner.as_ref(); len];
            decode_sequence(&types, data, start, budget).map(Token::Array)
        }
        ParamType::FixedArray(inner, len) => {
            ensure_room(data, at, inner, *len)?;
            let types = vec![inner.as_ref(); *len];
            decode_sequence(&types, data, at, budget).map(Token::FixedArray)
        }
        ParamType::Tuple(members) => {
            let types: Vec<&ParamType> = members.iter().collect();
            decode_sequence(&types, data, at, budget).map(Token::Tuple)
        }
    }
}

/// Reads a single word value.
fn decode_elementary(kind: &ParamType, data: &[u8], at: usize) -> Result<Token, AbiError> {
    match kind {
        ParamType::Address => {
            let word = read_word(data, at)?;
            if word[..12].iter().any(|b| *b != 0) {
                return Err(AbiError::ValueOutOfRange(kind.to_string()));
            }
            Ok(Token::Address(H160::from_slice(&word[12..])))
        }
        ParamType::Bool => match U256::from_big_endian(read_word(data, at)?) {
            value if value.is_zero() => Ok(Token::Bool(false)),
            value if value == U256::one() => Ok(Token::Bool(true)),
            _ => Err(AbiError::InvalidDiscriminant(kind.to_string())),
        },
        ParamType::Uint(bits) => {
            let value = U256::from_big_endian(read_word(data, at)?);
            if !fits_unsigned(&value, *bits) {
                return Err(AbiError::ValueOutOfRange(kind.to_string()));
            }
            Ok(Token::Uint(value))
        }
        ParamType::Int(bits) => {
            let value = U256::from_big_endian(read_word(data, at)?);
            if !fits_signed(&value, *bits) {
                return Err(AbiError::ValueOutOfRange(kind.to_string()));
            }
            Ok(Token::Int(value))
        }
        ParamType::FixedBytes(len) => {
            let word = read_word(data, at)?;
            if word[*len..].iter().any(|b| *b != 0) {
                return Err(AbiError::MalformedEncoding(format!("non-zero padding after {kind}")));
            }
            Ok(Token::FixedBytes(word[..*len].to_vec()))
        }
        _ => Err(AbiError::UnknownType(kind.to_string())),
    }
}

/// Each element needs at least its head slot, which bounds the allocation.
fn ensure_room(data: &[u8], start: usize, inner: &ParamType, len: usize) -> Result<(), AbiError> {
    let element_size = inner.head_size();
    if element_size == 0 {
        return Ok(());
    }
    let available = data.len().saturating_sub(start);
    if len > available / element_size {
        return Err(AbiError::BufferUnderrun { offset: start, needed: len.saturating_mul(element_size) });
    }
    Ok(())
}

fn read_word(data: &[u8], at: usize) -> Result<&[u8], AbiError> {
    read_slice(data, at, WORD_SIZE)
}

fn read_slice(data: &[u8], at: usize, len: usize) -> Result<&[u8], AbiError> {
    at.checked_add(len)
        .and_then(|end| data.get(at..end))
        .ok_or(AbiError::BufferUnderrun { offset: at, needed: len })
}

/// Reads a word used as an offset or a length.
fn read_usize(data: &[u8], at: usize) -> Result<usize, AbiError> {
    let value = U256::from_big_endian(read_word(data, at)?);
    // Anything that does not fit a usize cannot point inside the buffer.
    if value > U256::from(data.len()) {
        return Err(AbiError::BufferUnderrun { offset: at, needed: data.len().saturating_add(1) });
    }
    Ok(value.as_usize())
}

fn read_length_prefixed<'a>(data: &'a [u8], at: usize, budget: &mut WordBudget) -> Result<&'a [u8], AbiError> {
    let len = read_usize(data, at)?;
    let bytes = read_slice(data, at + WORD_SIZE, len)?;
    budget.charge(1 + len.div_ceil(WORD_SIZE), at)?;
    Ok(bytes)
}
