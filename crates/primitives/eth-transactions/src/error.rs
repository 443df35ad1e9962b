use dp_rlp::RlpError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EthTransactionError {
    #[error(transparent)]
    Rlp(#[from] RlpError),
    #[error("unsupported transaction type 0x{0:02x}")]
    UnsupportedType(u8),
    #[error("expected {expected} transaction fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },
    #[error("invalid signature: {0}")]
    InvalidSignature(&'static str),
    #[error("failed to recover the transaction sender")]
    RecoveryFailed,
    #[error(transparent)]
    Signer(#[from] SignerError),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("signing failed: {0}")]
    SigningFailed(String),
}
