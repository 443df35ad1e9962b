use dp_hashers::keccak256;
use dp_rlp::{decode, RlpError};
use primitive_types::{H160, H256};

use crate::recovery::recover_sender;
use crate::{tx_type, EthSignature, EthTransactionError, Result, TxEip1559, TxEip2930, TxLegacy, TypedTransaction};

/// A transaction together with its signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: TypedTransaction,
    pub signature: EthSignature,
}

impl SignedTransaction {
    pub fn new(transaction: TypedTransaction, signature: EthSignature) -> Self {
        Self { transaction, signature }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        self.transaction.encode_signed(&self.signature)
    }

    /// `0x` prefixed hex of the signed encoding, as sent with `eth_sendRawTransaction`.
    pub fn raw(&self) -> Result<String> {
        Ok(format!("0x{}", hex::encode(self.encode()?)))
    }

    /// Transaction hash, keccak256 of the signed encoding.
    pub fn hash(&self) -> Result<H256> {
        Ok(keccak256(self.encode()?))
    }

    pub fn signature_hash(&self) -> H256 {
        self.transaction.signature_hash()
    }

    pub fn recover_sender(&self) -> Result<H160> {
        recover_sender(&self.signature_hash(), &self.signature)
    }

    /// Decodes a signed legacy or typed transaction.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let first = *bytes.first().ok_or(RlpError::MalformedEncoding { offset: 0, reason: "empty input" })?;
        let (transaction, signature) = match first {
            0xc0..=0xff => {
                let (tx, signature) = TxLegacy::decode_signed(&decode(bytes)?)?;
                (TypedTransaction::Legacy(tx), signature)
            }
            tx_type::EIP2930 => {
                let (tx, signature) = TxEip2930::decode_signed(&decode(&bytes[1..])?)?;
                (TypedTransaction::Eip2930(tx), signature)
            }
            tx_type::EIP1559 => {
                let (tx, signature) = TxEip1559::decode_signed(&decode(&bytes[1..])?)?;
                (TypedTransaction::Eip1559(tx), signature)
            }
            other => {
                log::debug!("[eth-transactions] rejected transaction of unsupported type 0x{other:02x}");
                return Err(EthTransactionError::UnsupportedType(other));
            }
        };
        Ok(Self { transaction, signature })
    }

    pub fn decode_hex(raw: &str) -> Result<Self> {
        let digits = raw.strip_prefix("0x").unwrap_or(raw);
        let bytes = hex::decode(digits).map_err(|_| RlpError::MalformedEncoding { offset: 0, reason: "invalid hex" })?;
        Self::decode(&bytes)
    }
}
