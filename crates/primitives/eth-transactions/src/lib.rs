//! Ethereum transactions: the legacy, access list (EIP-2930) and fee market (EIP-1559)
//! layouts, their signing hashes, signed encodings and sender recovery.

mod access_list;
mod eip1559;
mod eip2930;
mod error;
mod legacy;
mod recovery;
mod signature;
mod signed;
mod signer;
mod typed;


pub use access_list::{AccessList, AccessListItem};
pub use eip1559::TxEip1559;
pub use eip2930::TxEip2930;
pub use error::{EthTransactionError, SignerError};
pub use legacy::TxLegacy;
pub use primitive_types::{H160, H256, U256};
pub use recovery::{public_key_to_address, recover_sender};
pub use signature::EthSignature;
pub use signed::SignedTransaction;
pub use signer::{EthSigner, LocalWallet};
pub use typed::TypedTransaction;

/// Transaction type constants per EIP-2718.
pub mod tx_type {
    /// Legacy transaction, encoded without a type byte.
    pub const LEGACY: u8 = 0x00;
    /// EIP-2930 access list transaction.
    pub const EIP2930: u8 = 0x01;
    /// EIP-1559 fee market transaction.
    pub const EIP1559: u8 = 0x02;
}

pub type Result<T> = core::result::Result<T, EthTransactionError>;
