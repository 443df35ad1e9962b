use dp_felt::FieldElement;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CairoCodecError {
    #[error("unknown Cairo type: {0}")]
    UnknownType(String),
    #[error("buffer underrun: {needed} felts needed at offset {offset}")]
    BufferUnderrun { offset: usize, needed: usize },
    #[error("invalid discriminant {value} for {kind}")]
    InvalidDiscriminant { kind: String, value: FieldElement },
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: &'static str },
    #[error("value out of range for {0}")]
    ValueOutOfRange(String),
    #[error("argument count mismatch: expected {expected}, got {actual}")]
    ArgumentCountMismatch { expected: usize, actual: usize },
    #[error("{remaining} trailing felts after decoding {consumed}")]
    TrailingData { consumed: usize, remaining: usize },
    #[error("event keys do not start with the selector of {0}")]
    EventSelectorMismatch(String),
}
