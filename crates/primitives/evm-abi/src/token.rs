use primitive_types::{H160, U256};

use crate::ParamType;

/// A value matching a [`ParamType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Address(H160),
    Bool(bool),
    Uint(U256),
    /// Signed integer in two's complement over 256 bits.
    Int(U256),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<Token>),
    FixedArray(Vec<Token>),
    Tuple(Vec<Token>),
}

impl Token {
    pub fn int(value: i128) -> Self {
        if value >= 0 {
            Self::Int(U256::from(value as u128))
        } else {
            Self::Int(U256::MAX - U256::from((-(value + 1)) as u128))
        }
    }

    pub fn uint(value: impl Into<U256>) -> Self {
        Self::Uint(value.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Bool(_) => "bool",
            Self::Uint(_) => "uint",
            Self::Int(_) => "int",
            Self::FixedBytes(_) => "fixed bytes",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::FixedArray(_) => "fixed array",
            Self::Tuple(_) => "tuple",
        }
    }

    /// Checks recursively that the token has the shape of `kind`.
    pub fn type_check(&self, kind: &ParamType) -> bool {
        match (kind, self) {
            (ParamType::Address, Self::Address(_))
            | (ParamType::Bool, Self::Bool(_))
            | (ParamType::Uint(_), Self::Uint(_))
            | (ParamType::Int(_), Self::Int(_))
            | (ParamType::Bytes, Self::Bytes(_))
            | (ParamType::String, Self::String(_)) => true,
            (ParamType::FixedBytes(len), Self::FixedBytes(bytes)) => bytes.len() == *len,
            (ParamType::Array(inner), Self::Array(items)) => items.iter().all(|item| item.type_check(inner)),
            (ParamType::FixedArray(inner, len), Self::FixedArray(items)) => {
                items.len() == *len && items.iter().all(|item| item.type_check(inner))
            }
            (ParamType::Tuple(members), Self::Tuple(items)) => {
                members.len() == items.len() && members.iter().zip(items).all(|(member, item)| item.type_check(member))
            }
            _ => false,
        }
    }

    pub fn into_address(self) -> Option<H160> {
        match self {
            Self::Address(address) => Some(address),
            _ => None,
        }
    }

    pub fn into_uint(self) -> Option<U256> {
        match self {
            Self::Uint(value) => Some(value),
            _ => None,
        }
    }
}

/// Whether `value`, read as two's complement, fits a signed integer of `bits` bits.
pub(crate) fn fits_signed(value: &U256, bits: usize) -> bool {
    if bits >= 256 {
        return true;
    }
    if value.bit(255) { *value >= U256::MAX << (bits - 1) } else { value.bits() < bits }
}

pub(crate) fn fits_unsigned(value: &U256, bits: usize) -> bool {
    value.bits() <= bits
}
