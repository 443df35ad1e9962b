use std::sync::OnceLock;

use dp_hashers::keccak256;
use primitive_types::{H160, H256};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, PublicKey, Secp256k1};

use crate::{EthSignature, EthTransactionError, Result};

/// Recovers the address that produced `signature` over `hash`.
pub fn recover_sender(hash: &H256, signature: &EthSignature) -> Result<H160> {
    let recovery_failed = |_| EthTransactionError::RecoveryFailed;
    let recid = RecoveryId::from_i32(signature.y_parity as i32).map_err(recovery_failed)?;
    let recoverable = RecoverableSignature::from_compact(&signature.to_compact(), recid).map_err(recovery_failed)?;
    let message = Message::from_digest_slice(hash.as_bytes()).map_err(recovery_failed)?;
    let public_key = secp().recover_ecdsa(&message, &recoverable).map_err(|_| {
        log::debug!("[eth-transactions] could not recover a public key for hash {hash:?}");
        EthTransactionError::RecoveryFailed
    })?;
    Ok(public_key_to_address(&public_key))
}

/// Last 20 bytes of the keccak256 of the uncompressed key without its format byte.
pub fn public_key_to_address(public_key: &PublicKey) -> H160 {
    let uncompressed = public_key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    H160::from_slice(&hash.as_bytes()[12..])
}

pub(crate) fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}
