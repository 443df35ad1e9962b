use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("unknown ABI type: {0}")]
    UnknownType(String),
    #[error("argument count mismatch: expected {expected}, got {actual}")]
    ArgumentCountMismatch { expected: usize, actual: usize },
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: &'static str },
    #[error("value out of range for {0}")]
    ValueOutOfRange(String),
    #[error("buffer underrun: {needed} bytes needed at offset {offset}")]
    BufferUnderrun { offset: usize, needed: usize },
    #[error("invalid discriminant for {0}")]
    InvalidDiscriminant(String),
    #[error("malformed ABI encoding: {0}")]
    MalformedEncoding(String),
    #[error("selector mismatch for function {0}")]
    SelectorMismatch(String),
    #[error("log does not match the signature of event {0}")]
    EventSignatureMismatch(String),
}
