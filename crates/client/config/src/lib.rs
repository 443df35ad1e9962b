//! Configuration of the Ethereum and Starknet codecs.
//!
//! Every field has a default so a partial (or empty) JSON file is a valid configuration.
//! Defaults target Ethereum mainnet and Starknet mainnet.
//!
//! {
//!     "ethereum": { "chain_id": 1, "default_tx_type": 2 },
//!     "starknet": { "chain_id": "SN_SEPOLIA", "typed_data_revision": 1, "query_transactions": false }
//! }

pub mod error;

use std::fs::File;
use std::path::PathBuf;

use dp_chain_id::chain_id_from_name;
use dp_eth_transactions::tx_type;
use dp_felt::FieldElement;
use dp_transactions::Transaction;
use dp_typed_data::snip12::Revision;
use serde::{Deserialize, Serialize};

pub use crate::error::ConfigError;

/// Ethereum mainnet
pub const DEFAULT_ETHEREUM_CHAIN_ID: u64 = 1;
pub const DEFAULT_STARKNET_CHAIN_ID: &str = "SN_MAIN";
pub const DEFAULT_TYPED_DATA_REVISION: u8 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualityConfig {
    #[serde(default)]
    pub ethereum: EthereumConfig,
    #[serde(default)]
    pub starknet: StarknetConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthereumConfig {
    #[serde(default = "default_ethereum_chain_id")]
    pub chain_id: u64,
    /// Envelope used for new transactions, `0` legacy, `1` EIP-2930 or `2` EIP-1559.
    #[serde(default = "default_tx_type")]
    pub default_tx_type: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarknetConfig {
    /// A network name such as `SN_SEPOLIA`, a `0x` hex felt or any short string.
    #[serde(default = "default_starknet_chain_id")]
    pub chain_id: String,
    #[serde(default = "default_typed_data_revision")]
    pub typed_data_revision: u8,
    /// Hash transactions with the query version offset, for simulation only.
    #[serde(default)]
    pub query_transactions: bool,
}

fn default_ethereum_chain_id() -> u64 {
    DEFAULT_ETHEREUM_CHAIN_ID
}

fn default_tx_type() -> u8 {
    tx_type::EIP1559
}

fn default_starknet_chain_id() -> String {
    DEFAULT_STARKNET_CHAIN_ID.to_string()
}

fn default_typed_data_revision() -> u8 {
    DEFAULT_TYPED_DATA_REVISION
}

impl Default for EthereumConfig {
    fn default() -> Self {
        Self { chain_id: default_ethereum_chain_id(), default_tx_type: default_tx_type() }
    }
}

impl Default for StarknetConfig {
    fn default() -> Self {
        Self {
            chain_id: default_starknet_chain_id(),
            typed_data_revision: default_typed_data_revision(),
            query_transactions: false,
        }
    }
}

impl EthereumConfig {
    pub fn tx_type(&self) -> Result<u8, ConfigError> {
        match self.default_tx_type {
            tx_type::LEGACY | tx_type::EIP2930 | tx_type::EIP1559 => Ok(self.default_tx_type),
            other => Err(ConfigError::UnsupportedTxType(other)),
        }
    }
}

impl StarknetConfig {
    pub fn chain_id(&self) -> Result<FieldElement, ConfigError> {
        if let Some(chain_id) = chain_id_from_name(&self.chain_id) {
            return Ok(chain_id);
        }
        let parsed = if self.chain_id.starts_with("0x") {
            FieldElement::from_hex_be(&self.chain_id)
        } else {
            FieldElement::from_short_string(&self.chain_id)
        };
        parsed.map_err(|e| ConfigError::InvalidChainId(self.chain_id.clone(), e))
    }

    pub fn typed_data_revision(&self) -> Result<Revision, ConfigError> {
        match self.typed_data_revision {
            0 => Ok(Revision::V0),
            1 => Ok(Revision::V1),
            other => Err(ConfigError::UnsupportedRevision(other)),
        }
    }
}

impl DualityConfig {
    pub fn starknet_chain_id(&self) -> Result<FieldElement, ConfigError> {
        self.starknet.chain_id()
    }

    /// Hash of `transaction` on the configured Starknet chain.
    pub fn starknet_transaction_hash(&self, transaction: &Transaction) -> Result<FieldElement, ConfigError> {
        Ok(transaction.transaction_hash(self.starknet_chain_id()?, self.starknet.query_transactions))
    }

    /// Checks every field that is not validated by deserialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ethereum.tx_type()?;
        self.starknet.chain_id()?;
        self.starknet.typed_data_revision()?;
        Ok(())
    }
}

impl TryFrom<&PathBuf> for DualityConfig {
    type Error = ConfigError;

    fn try_from(path: &PathBuf) -> Result<Self, Self::Error> {
        let file = File::open(path).map_err(ConfigError::ConfigReadFromFile)?;
        let config: Self = serde_json::from_reader(file).map_err(ConfigError::ConfigDecodeFromJson)?;
        if let Err(e) = config.validate() {
            log::debug!("[config] rejected {}: {e}", path.display());
            return Err(e);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests;
