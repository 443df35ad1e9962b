use thiserror::Error;

/// Error related to [`FieldElement`](crate::FieldElement) construction and arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FeltError {
    /// Malformed textual representation.
    #[error("invalid field element encoding: {0}")]
    InvalidEncoding(String),
    /// Input holds more bytes than the target representation.
    #[error("input too long: expected at most {max} bytes, got {actual}")]
    InputTooLong { max: usize, actual: usize },
    /// Divisor reduced to zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Value is too large to fit into target type.
    #[error("field element value too large for target type")]
    ValueTooLarge,
}
