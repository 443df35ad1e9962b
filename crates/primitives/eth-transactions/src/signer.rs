use core::fmt;

use primitive_types::{H160, H256, U256};
use secp256k1::{Message, PublicKey, SecretKey};

use crate::recovery::{public_key_to_address, secp};
use crate::{EthSignature, SignerError};

/// Produces recoverable signatures over 32-byte hashes.
pub trait EthSigner: Send + Sync {
    fn address(&self) -> H160;

    fn sign_hash(&self, hash: &H256) -> Result<EthSignature, SignerError>;
}

/// Signer holding a secp256k1 secret key in memory.
#[derive(Clone)]
pub struct LocalWallet {
    secret_key: SecretKey,
    address: H160,
}

impl LocalWallet {
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self, SignerError> {
        let secret_key =
            SecretKey::from_slice(secret).map_err(|err| SignerError::SigningFailed(format!("invalid secret key: {err}")))?;
        let address = public_key_to_address(&PublicKey::from_secret_key(secp(), &secret_key));
        Ok(Self { secret_key, address })
    }

    pub fn from_hex(secret: &str) -> Result<Self, SignerError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(secret.strip_prefix("0x").unwrap_or(secret), &mut bytes)
            .map_err(|err| SignerError::SigningFailed(format!("invalid secret key: {err}")))?;
        Self::from_bytes(&bytes)
    }
}

impl EthSigner for LocalWallet {
    fn address(&self) -> H160 {
        self.address
    }

    fn sign_hash(&self, hash: &H256) -> Result<EthSignature, SignerError> {
        let message =
            Message::from_digest_slice(hash.as_bytes()).map_err(|err| SignerError::SigningFailed(err.to_string()))?;
        let (recid, compact) = secp().sign_ecdsa_recoverable(&message, &self.secret_key).serialize_compact();
        Ok(EthSignature {
            r: U256::from_big_endian(&compact[..32]),
            s: U256::from_big_endian(&compact[32..]),
            y_parity: recid.to_i32() == 1,
        })
    }
}

impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet").field("address", &self.address).finish_non_exhaustive()
    }
}
