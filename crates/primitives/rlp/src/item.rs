use primitive_types::{H160, H256, U256};

use crate::{encode_header, minimal_be_bytes, RlpError, LIST_OFFSET, STRING_OFFSET};

/// A decoded or to-be-encoded RLP value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    pub fn empty() -> Self {
        Self::Bytes(Vec::new())
    }

    /// Minimal big-endian encoding, zero is the empty string.
    pub fn uint(value: U256) -> Self {
        let mut buf = [0u8; 32];
        value.to_big_endian(&mut buf);
        Self::Bytes(minimal_be_bytes(&buf).to_vec())
    }

    pub fn u64(value: u64) -> Self {
        Self::Bytes(minimal_be_bytes(&value.to_be_bytes()).to_vec())
    }

    pub fn u128(value: u128) -> Self {
        Self::Bytes(minimal_be_bytes(&value.to_be_bytes()).to_vec())
    }

    pub fn address(address: &H160) -> Self {
        Self::Bytes(address.as_bytes().to_vec())
    }

    /// Empty string for contract creation, the address otherwise.
    pub fn optional_address(address: Option<&H160>) -> Self {
        address.map(Self::address).unwrap_or_else(Self::empty)
    }

    pub fn h256(hash: &H256) -> Self {
        Self::Bytes(hash.as_bytes().to_vec())
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_to(&mut out);
        out
    }

    pub fn encode_to(&self, out: &mut Vec<u8>) {
        match self {
            Self::Bytes(bytes) if bytes.len() == 1 && bytes[0] < STRING_OFFSET => out.push(bytes[0]),
            Self::Bytes(bytes) => {
                encode_header(bytes.len(), STRING_OFFSET, out);
                out.extend_from_slice(bytes);
            }
            Self::List(items) => {
                let mut payload = Vec::new();
                for item in items {
                    item.encode_to(&mut payload);
                }
                encode_header(payload.len(), LIST_OFFSET, out);
                out.extend_from_slice(&payload);
            }
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            Self::List(_) => Err(RlpError::unexpected("byte string")),
        }
    }

    pub fn as_list(&self) -> Result<&[RlpItem], RlpError> {
        match self {
            Self::List(items) => Ok(items),
            Self::Bytes(_) => Err(RlpError::unexpected("list")),
        }
    }

    pub fn as_u256(&self) -> Result<U256, RlpError> {
        let bytes = self.canonical_integer(32)?;
        Ok(U256::from_big_endian(bytes))
    }

    pub fn as_u128(&self) -> Result<u128, RlpError> {
        let bytes = self.canonical_integer(16)?;
        Ok(bytes.iter().fold(0u128, |acc, b| (acc << 8) | *b as u128))
    }

    pub fn as_u64(&self) -> Result<u64, RlpError> {
        let bytes = self.canonical_integer(8)?;
        Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64))
    }

    pub fn as_address(&self) -> Result<H160, RlpError> {
        let bytes = self.as_bytes()?;
        if bytes.len() != 20 {
            return Err(RlpError::unexpected("20-byte address"));
        }
        Ok(H160::from_slice(bytes))
    }

    /// Empty string decodes to `None` (contract creation).
    pub fn as_optional_address(&self) -> Result<Option<H160>, RlpError> {
        if self.as_bytes()?.is_empty() { Ok(None) } else { self.as_address().map(Some) }
    }

    pub fn as_h256(&self) -> Result<H256, RlpError> {
        let bytes = self.as_bytes()?;
        if bytes.len() != 32 {
            return Err(RlpError::unexpected("32-byte hash"));
        }
        Ok(H256::from_slice(bytes))
    }

    fn canonical_integer(&self, max_len: usize) -> Result<&[u8], RlpError> {
        let bytes = self.as_bytes()?;
        if bytes.len() > max_len {
            return Err(RlpError::unexpected("integer within range"));
        }
        if bytes.first() == Some(&0) {
            return Err(RlpError::unexpected("integer without leading zeros"));
        }
        Ok(bytes)
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        Self::List(items)
    }
}

impl From<&str> for RlpItem {
    fn from(value: &str) -> Self {
        Self::Bytes(value.as_bytes().to_vec())
    }
}
