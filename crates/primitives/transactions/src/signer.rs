//! Stark curve signatures over transaction hashes.

use core::fmt;

use dp_felt::FieldElement;
use serde::{Deserialize, Serialize};
use starknet_crypto::{get_public_key, rfc6979_generate_k, sign, verify, SignError};
use starknet_ff::FieldElement as StarkFieldElement;

use crate::SignerError;

/// An ECDSA signature on the Stark curve. The signer's public key is needed to verify it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StarkSignature {
    pub r: FieldElement,
    pub s: FieldElement,
}

impl StarkSignature {
    /// The `[r, s]` layout carried by transactions.
    pub fn to_vec(&self) -> Vec<FieldElement> {
        vec![self.r, self.s]
    }
}

/// Signs felt hashes on behalf of an account.
pub trait StarkSigner: Send + Sync {
    fn public_key(&self) -> FieldElement;

    fn sign_hash(&self, hash: &FieldElement) -> Result<StarkSignature, SignerError>;
}

/// Signer holding a Stark private key in memory. Nonces are derived with RFC 6979.
#[derive(Clone)]
pub struct LocalStarkSigner {
    private_key: StarkFieldElement,
    public_key: FieldElement,
}

impl LocalStarkSigner {
    pub fn from_secret_scalar(secret_scalar: FieldElement) -> Result<Self, SignerError> {
        if secret_scalar.is_zero() {
            return Err(SignerError::SigningFailed("private key must not be zero".to_string()));
        }
        let private_key = to_stark_felt(&secret_scalar)?;
        let public_key = from_stark_felt(get_public_key(&private_key));
        Ok(Self { private_key, public_key })
    }
}

impl StarkSigner for LocalStarkSigner {
    fn public_key(&self) -> FieldElement {
        self.public_key
    }

    fn sign_hash(&self, hash: &FieldElement) -> Result<StarkSignature, SignerError> {
        let message = to_stark_felt(hash)?;
        let mut seed: Option<StarkFieldElement> = None;
        loop {
            let k = rfc6979_generate_k(&message, &self.private_key, seed.as_ref());
            match sign(&self.private_key, &message, &k) {
                Ok(signature) => {
                    return Ok(StarkSignature { r: from_stark_felt(signature.r), s: from_stark_felt(signature.s) });
                }
                Err(SignError::InvalidK) => {
                    log::debug!("[transactions] rejected nonce while signing {hash}, retrying with a new seed");
                    seed = Some(seed.unwrap_or(StarkFieldElement::ZERO) + StarkFieldElement::ONE);
                }
                Err(err) => return Err(SignerError::SigningFailed(format!("{err:?}"))),
            }
        }
    }
}

impl fmt::Debug for LocalStarkSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStarkSigner").field("public_key", &self.public_key).finish_non_exhaustive()
    }
}

/// Checks `signature` over `hash` against `public_key`. Out of range inputs never verify.
pub fn verify_signature(public_key: &FieldElement, hash: &FieldElement, signature: &StarkSignature) -> bool {
    let (Ok(public_key), Ok(hash), Ok(r), Ok(s)) =
        (to_stark_felt(public_key), to_stark_felt(hash), to_stark_felt(&signature.r), to_stark_felt(&signature.s))
    else {
        return false;
    };
    verify(&public_key, &hash, &r, &s).unwrap_or(false)
}

fn to_stark_felt(felt: &FieldElement) -> Result<StarkFieldElement, SignerError> {
    StarkFieldElement::from_bytes_be(&felt.to_bytes_be())
        .map_err(|_| SignerError::SigningFailed(format!("{felt} is not a field element")))
}

fn from_stark_felt(felt: StarkFieldElement) -> FieldElement {
    FieldElement::from_bytes_be(&felt.to_bytes_be())
}
