//! EIP-712 typed structured data hashing.
//!
//! `hashStruct(s) = keccak256(typeHash ‖ encodeData(s))`, and the signing digest is
//! `keccak256(0x19 0x01 ‖ domainSeparator ‖ hashStruct(message))`.

use std::borrow::Cow;
use std::collections::BTreeSet;

use dp_evm_abi::{encode, ParamType, Token};
use dp_hashers::keccak256;
use primitive_types::{H160, H256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::{as_array, as_object, member, parse_bool, parse_hex_bytes, parse_integer};
use crate::{Result, TypedDataError, TypedDataField, Types};

/// Name of the domain type.
pub const DOMAIN_TYPE: &str = "EIP712Domain";

/// Domain members in canonical order, used when the domain type is not declared.
const DOMAIN_FIELDS: [(&str, &str); 5] = [
    ("name", "string"),
    ("version", "string"),
    ("chainId", "uint256"),
    ("verifyingContract", "address"),
    ("salt", "bytes32"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    pub types: Types,
    pub primary_type: String,
    pub domain: Value,
    pub message: Value,
}

impl TypedData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Members of `name`. An undeclared `EIP712Domain` is derived from the domain's keys.
    fn fields(&self, name: &str) -> Result<Cow<'_, [TypedDataField]>> {
        if let Some(fields) = self.types.get(name) {
            return Ok(Cow::Borrowed(fields));
        }
        if name == DOMAIN_TYPE {
            let fields = DOMAIN_FIELDS
                .iter()
                .filter(|(field, _)| self.domain.get(field).is_some_and(|value| !value.is_null()))
                .map(|(field, kind)| TypedDataField::new(*field, *kind))
                .collect::<Vec<_>>();
            return Ok(Cow::Owned(fields));
        }
        Err(TypedDataError::UnknownType(name.to_string()))
    }

    fn is_struct(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// `Primary(type name,...)` followed by every referenced type, sorted by name.
    pub fn encode_type(&self, primary: &str) -> Result<String> {
        let mut dependencies = BTreeSet::new();
        let mut pending = vec![primary.to_string()];
        while let Some(name) = pending.pop() {
            for field in self.fields(&name)?.iter() {
                let base = base_type(&field.kind);
                if base != primary && self.is_struct(base) && dependencies.insert(base.to_string()) {
                    pending.push(base.to_string());
                }
            }
        }

        let mut encoded = self.encode_single_type(primary)?;
        for dependency in &dependencies {
            encoded.push_str(&self.encode_single_type(dependency)?);
        }
        Ok(encoded)
    }

    fn encode_single_type(&self, name: &str) -> Result<String> {
        let members =
            self.fields(name)?.iter().map(|field| format!("{} {}", field.kind, field.name)).collect::<Vec<_>>();
        Ok(format!("{name}({})", members.join(",")))
    }

    pub fn type_hash(&self, name: &str) -> Result<H256> {
        Ok(keccak256(self.encode_type(name)?))
    }

    /// `keccak256(typeHash ‖ encodeData(data))`
    pub fn hash_struct(&self, name: &str, data: &Value) -> Result<H256> {
        let object = as_object(name, data)?;
        let fields = self.fields(name)?;
        let mut encoded = Vec::with_capacity(32 * (fields.len() + 1));
        encoded.extend_from_slice(self.type_hash(name)?.as_bytes());
        for field in fields.iter() {
            let value = member(name, object, &field.name)?;
            encoded.extend_from_slice(self.encode_value(&field.kind, value)?.as_bytes());
        }
        Ok(keccak256(encoded))
    }

    fn encode_value(&self, kind: &str, value: &Value) -> Result<H256> {
        if let Some((inner, len)) = split_array(kind)? {
            let items = as_array(kind, value)?;
            if len.is_some_and(|len| len != items.len()) {
                return Err(TypedDataError::invalid_value(kind, value));
            }
            let mut encoded = Vec::with_capacity(32 * items.len());
            for item in items {
                encoded.extend_from_slice(self.encode_value(inner, item)?.as_bytes());
            }
            return Ok(keccak256(encoded));
        }
        if self.is_struct(kind) {
            return self.hash_struct(kind, value);
        }

        match kind {
            "string" => {
                let text = value.as_str().ok_or_else(|| TypedDataError::invalid_value(kind, value))?;
                Ok(keccak256(text))
            }
            "bytes" => Ok(keccak256(parse_hex_bytes(kind, value)?)),
            _ => {
                let param = ParamType::parse(kind).map_err(|_| TypedDataError::UnsupportedType(kind.to_string()))?;
                if !param.is_value_type() {
                    return Err(TypedDataError::UnsupportedType(kind.to_string()));
                }
                let token = token_from_json(kind, &param, value)?;
                Ok(H256::from_slice(&encode(&[param], &[token])?))
            }
        }
    }

    pub fn domain_separator(&self) -> Result<H256> {
        self.hash_struct(DOMAIN_TYPE, &self.domain)
    }

    /// `keccak256(0x19 0x01 ‖ domainSeparator ‖ hashStruct(message))`
    pub fn signing_hash(&self) -> Result<H256> {
        let domain_separator = self.domain_separator()?;
        let struct_hash = self.hash_struct(&self.primary_type, &self.message)?;

        let mut preimage = Vec::with_capacity(66);
        preimage.extend_from_slice(&[0x19, 0x01]);
        preimage.extend_from_slice(domain_separator.as_bytes());
        preimage.extend_from_slice(struct_hash.as_bytes());
        let digest = keccak256(preimage);
        log::trace!("[typed-data] eip712 {} message hashed to {digest:?}", self.primary_type);
        Ok(digest)
    }
}

/// Strips every array suffix, `Person[][2]` becomes `Person`.
fn base_type(kind: &str) -> &str {
    kind.find('[').map_or(kind, |index| &kind[..index])
}

/// Splits the outermost array suffix: `T[]` gives `(T, None)` and `T[3]` gives `(T, Some(3))`.
fn split_array(kind: &str) -> Result<Option<(&str, Option<usize>)>> {
    if !kind.ends_with(']') {
        return Ok(None);
    }
    let open = kind.rfind('[').ok_or_else(|| TypedDataError::UnsupportedType(kind.to_string()))?;
    let size = &kind[open + 1..kind.len() - 1];
    let len = if size.is_empty() {
        None
    } else {
        Some(size.parse::<usize>().map_err(|_| TypedDataError::UnsupportedType(kind.to_string()))?)
    };
    Ok(Some((&kind[..open], len)))
}

fn token_from_json(kind: &str, param: &ParamType, value: &Value) -> Result<Token> {
    let invalid = || TypedDataError::invalid_value(kind, value);
    match param {
        ParamType::Address => {
            let bytes = parse_hex_bytes(kind, value)?;
            if bytes.len() != 20 {
                return Err(invalid());
            }
            Ok(Token::Address(H160::from_slice(&bytes)))
        }
        ParamType::Bool => Ok(Token::Bool(parse_bool(kind, value)?)),
        ParamType::Uint(_) => match parse_integer(kind, value)? {
            (false, magnitude) => Ok(Token::Uint(magnitude)),
            (true, _) => Err(invalid()),
        },
        ParamType::Int(_) => {
            let (negative, magnitude) = parse_integer(kind, value)?;
            let min_magnitude = U256::one() << 255;
            match negative {
                false if magnitude < min_magnitude => Ok(Token::Int(magnitude)),
                true if magnitude <= min_magnitude => Ok(Token::Int(U256::zero().overflowing_sub(magnitude).0)),
                _ => Err(invalid()),
            }
        }
        ParamType::FixedBytes(_) => Ok(Token::FixedBytes(parse_hex_bytes(kind, value)?)),
        _ => Err(TypedDataError::UnsupportedType(kind.to_string())),
    }
}

#[cfg(test)]
#[path = "eip712_tests.rs"]
mod tests;
