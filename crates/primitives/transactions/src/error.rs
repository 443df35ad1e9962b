use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignerError {
    #[error("signing failed: {0}")]
    SigningFailed(String),
}
