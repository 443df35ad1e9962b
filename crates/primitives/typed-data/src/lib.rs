//! Typed structured data hashing for both chains.
//!
//! [`eip712`] hashes Ethereum typed data with Keccak-256, [`snip12`] hashes Starknet typed
//! data with Pedersen (revision 0) or Poseidon (revision 1). Both take the same JSON shape:
//! `{ types, primaryType, domain, message }`.

pub mod eip712;
mod error;
pub mod snip12;
mod value;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use error::TypedDataError;

pub type Result<T> = core::result::Result<T, TypedDataError>;

/// Type definitions by name, in declaration order.
pub type Types = IndexMap<String, Vec<TypedDataField>>;

/// One member of a type definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Element type of `merkletree` members and definition of `enum` members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
}

impl TypedDataField {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self { name: name.into(), kind: kind.into(), contains: None }
    }

    pub fn with_contains(mut self, contains: impl Into<String>) -> Self {
        self.contains = Some(contains.into());
        self
    }
}
