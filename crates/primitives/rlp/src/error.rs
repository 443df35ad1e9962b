use thiserror::Error;

/// Error that may occur while decoding RLP data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RlpError {
    /// Input is not a canonical RLP encoding.
    #[error("malformed RLP encoding at offset {offset}: {reason}")]
    MalformedEncoding { offset: usize, reason: &'static str },
    /// Item is well formed but does not have the expected shape.
    #[error("unexpected RLP item: expected {expected}")]
    UnexpectedItem { expected: &'static str },
}

impl RlpError {
    pub(crate) fn malformed(offset: usize, reason: &'static str) -> Self {
        log::debug!("[rlp] rejected encoding at offset {offset}: {reason}");
        Self::MalformedEncoding { offset, reason }
    }

    pub(crate) fn unexpected(expected: &'static str) -> Self {
        Self::UnexpectedItem { expected }
    }
}
