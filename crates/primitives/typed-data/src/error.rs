use dp_evm_abi::AbiError;
use dp_felt::FeltError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypedDataError {
    #[error("unknown type {0}")]
    UnknownType(String),
    #[error("unsupported type {0}")]
    UnsupportedType(String),
    #[error("missing field {field} of {kind}")]
    MissingField { kind: String, field: String },
    #[error("invalid {kind} value {value}")]
    InvalidValue { kind: String, value: String },
    #[error("unsupported typed data revision {0}")]
    InvalidRevision(String),
    #[error("merkle tree has no leaves")]
    EmptyMerkleTree,
    #[error(transparent)]
    Abi(#[from] AbiError),
    #[error(transparent)]
    Felt(#[from] FeltError),
    #[error("failed to parse typed data: {0}")]
    Json(#[from] serde_json::Error),
}

impl TypedDataError {
    pub(crate) fn invalid_value(kind: &str, value: &serde_json::Value) -> Self {
        Self::InvalidValue { kind: kind.to_string(), value: value.to_string() }
    }
}
