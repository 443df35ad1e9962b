use dp_hashers::keccak256;
use dp_rlp::{encode_list, RlpItem};
use primitive_types::H256;

use crate::{tx_type, EthSignature, EthSigner, EthTransactionError, Result, SignedTransaction, TxEip1559, TxEip2930, TxLegacy};

/// An unsigned transaction of any supported type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedTransaction {
    Legacy(TxLegacy),
    Eip2930(TxEip2930),
    Eip1559(TxEip1559),
}

impl TypedTransaction {
    pub fn tx_type(&self) -> u8 {
        match self {
            Self::Legacy(_) => tx_type::LEGACY,
            Self::Eip2930(_) => tx_type::EIP2930,
            Self::Eip1559(_) => tx_type::EIP1559,
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Self::Legacy(tx) => tx.chain_id,
            Self::Eip2930(tx) => Some(tx.chain_id),
            Self::Eip1559(tx) => Some(tx.chain_id),
        }
    }

    pub fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::Eip2930(tx) => tx.nonce,
            Self::Eip1559(tx) => tx.nonce,
        }
    }

    /// The payload whose hash is signed.
    pub fn encode_for_signing(&self) -> Vec<u8> {
        match self {
            Self::Legacy(tx) => tx.encode_for_signing(),
            Self::Eip2930(tx) => typed_envelope(tx_type::EIP2930, tx.rlp_fields()),
            Self::Eip1559(tx) => typed_envelope(tx_type::EIP1559, tx.rlp_fields()),
        }
    }

    pub fn signature_hash(&self) -> H256 {
        let hash = keccak256(self.encode_for_signing());
        log::trace!("[eth-transactions] signature hash of type {} transaction: {hash:?}", self.tx_type());
        hash
    }

    /// Signed encoding, `(v | yParity, r, s)` appended to the fields.
    pub fn encode_signed(&self, signature: &EthSignature) -> Result<Vec<u8>> {
        let parity = signature.y_parity as u64;
        match self {
            Self::Legacy(tx) => tx.encode_signed(signature),
            Self::Eip2930(tx) => {
                let mut fields = tx.rlp_fields();
                fields.extend(signature.rlp_fields(parity));
                Ok(typed_envelope(tx_type::EIP2930, fields))
            }
            Self::Eip1559(tx) => {
                let mut fields = tx.rlp_fields();
                fields.extend(signature.rlp_fields(parity));
                Ok(typed_envelope(tx_type::EIP1559, fields))
            }
        }
    }

    pub fn into_signed(self, signature: EthSignature) -> SignedTransaction {
        SignedTransaction::new(self, signature)
    }

    /// Signs the signature hash with `signer`.
    pub fn sign<S: EthSigner>(self, signer: &S) -> Result<SignedTransaction> {
        let signature = signer.sign_hash(&self.signature_hash())?;
        Ok(self.into_signed(signature))
    }
}

impl From<TxLegacy> for TypedTransaction {
    fn from(tx: TxLegacy) -> Self {
        Self::Legacy(tx)
    }
}

impl From<TxEip2930> for TypedTransaction {
    fn from(tx: TxEip2930) -> Self {
        Self::Eip2930(tx)
    }
}

impl From<TxEip1559> for TypedTransaction {
    fn from(tx: TxEip1559) -> Self {
        Self::Eip1559(tx)
    }
}

fn typed_envelope(tx_type: u8, fields: Vec<RlpItem>) -> Vec<u8> {
    let mut out = vec![tx_type];
    out.extend(encode_list(&fields));
    out
}

pub(crate) fn expect_fields<const N: usize>(item: &RlpItem) -> Result<&[RlpItem; N]> {
    let fields = item.as_list()?;
    fields.try_into().map_err(|_| EthTransactionError::FieldCount { expected: N, actual: fields.len() })
}
