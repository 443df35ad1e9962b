use dp_felt::FeltError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config from file: {0}")]
    ConfigReadFromFile(#[source] std::io::Error),
    #[error("Failed to decode from JSON: {0}")]
    ConfigDecodeFromJson(#[source] serde_json::Error),
    #[error("Invalid Starknet chain id {0}: {1}")]
    InvalidChainId(String, #[source] FeltError),
    #[error("Unsupported Ethereum transaction type {0}")]
    UnsupportedTxType(u8),
    #[error("Unsupported typed data revision {0}")]
    UnsupportedRevision(u8),
}
