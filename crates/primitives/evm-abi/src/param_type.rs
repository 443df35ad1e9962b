use core::fmt;

use crate::{AbiError, WORD_SIZE};

/// A Solidity ABI type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamType {
    Address,
    Bool,
    /// Unsigned integer of the given bit width.
    Uint(usize),
    /// Signed integer of the given bit width.
    Int(usize),
    /// `bytesN`, 1 to 32 bytes.
    FixedBytes(usize),
    Bytes,
    String,
    Array(Box<ParamType>),
    FixedArray(Box<ParamType>, usize),
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Parses a canonical or shorthand type signature such as `uint`, `bytes32[2]`
    /// or `tuple(address,uint256[])`.
    pub fn parse(signature: &str) -> Result<Self, AbiError> {
        let signature = signature.trim();
        let unknown = || AbiError::UnknownType(signature.to_string());

        if let Some(rest) = signature.strip_suffix(']') {
            let open = rest.rfind('[').ok_or_else(unknown)?;
            let inner = Self::parse(&rest[..open])?;
            let dimension = &rest[open + 1..];
            if dimension.is_empty() {
                return Ok(Self::Array(Box::new(inner)));
            }
            let len: usize = dimension.parse().map_err(|_| unknown())?;
            if len == 0 {
                return Err(unknown());
            }
            return Ok(Self::FixedArray(Box::new(inner), len));
        }

        let tuple = signature.strip_prefix("tuple").unwrap_or(signature);
        if let Some(body) = tuple.strip_prefix('(') {
            let body = body.strip_suffix(')').ok_or_else(unknown)?;
            let members = split_top_level(body).ok_or_else(unknown)?;
            return members.into_iter().map(Self::parse).collect::<Result<Vec<_>, _>>().map(Self::Tuple);
        }

        match signature {
            "address" => return Ok(Self::Address),
            "bool" => return Ok(Self::Bool),
            "string" => return Ok(Self::String),
            "bytes" => return Ok(Self::Bytes),
            "uint" => return Ok(Self::Uint(256)),
            "int" => return Ok(Self::Int(256)),
            _ => {}
        }

        if let Some(bits) = signature.strip_prefix("uint") {
            return integer_width(bits).map(Self::Uint).ok_or_else(unknown);
        }
        if let Some(bits) = signature.strip_prefix("int") {
            return integer_width(bits).map(Self::Int).ok_or_else(unknown);
        }
        if let Some(len) = signature.strip_prefix("bytes") {
            return fixed_bytes_len(len).map(Self::FixedBytes).ok_or_else(unknown);
        }

        Err(unknown())
    }

    /// Dynamic types are encoded in the tail and referenced by an offset.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Bytes | Self::String | Self::Array(_) => true,
            Self::FixedArray(inner, _) => inner.is_dynamic(),
            Self::Tuple(members) => members.iter().any(Self::is_dynamic),
            _ => false,
        }
    }

    /// Elementary types that fit a single word and are stored as-is in a topic.
    pub fn is_value_type(&self) -> bool {
        matches!(self, Self::Address | Self::Bool | Self::Uint(_) | Self::Int(_) | Self::FixedBytes(_))
    }

    /// Number of bytes the type occupies in the head of an enclosing sequence.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return WORD_SIZE;
        }
        match self {
            Self::FixedArray(inner, len) => inner.head_size() * len,
            Self::Tuple(members) => members.iter().map(Self::head_size).sum(),
            _ => WORD_SIZE,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Bool => write!(f, "bool"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::FixedBytes(len) => write!(f, "bytes{len}"),
            Self::Bytes => write!(f, "bytes"),
            Self::String => write!(f, "string"),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
            Self::Tuple(members) => {
                write!(f, "(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{member}")?;
                }
                write!(f, ")")
            }
        }
    }
}

fn integer_width(bits: &str) -> Option<usize> {
    if bits.starts_with('0') {
        return None;
    }
    let bits: usize = bits.parse().ok()?;
    (bits > 0 && bits <= 256 && bits % 8 == 0).then_some(bits)
}

fn fixed_bytes_len(len: &str) -> Option<usize> {
    if len.starts_with('0') {
        return None;
    }
    let len: usize = len.parse().ok()?;
    (1..=32).contains(&len).then_some(len)
}

/// Splits a tuple body on commas that are not nested in parentheses.
pub(crate) fn split_top_level(body: &str) -> Option<Vec<&str>> {
    if body.trim().is_empty() {
        return Some(Vec::new());
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&body[start..]);
    Some(parts)
}
