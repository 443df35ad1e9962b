use dp_rlp::RlpItem;
use primitive_types::U256;

use crate::{EthTransactionError, Result};

/// A secp256k1 signature with its public key recovery bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EthSignature {
    pub r: U256,
    pub s: U256,
    pub y_parity: bool,
}

impl EthSignature {
    pub fn new(r: U256, s: U256, y_parity: bool) -> Self {
        Self { r, s, y_parity }
    }

    /// `r ‖ s ‖ v` with `v` as 27 or 28.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        self.r.to_big_endian(&mut bytes[..32]);
        self.s.to_big_endian(&mut bytes[32..64]);
        bytes[64] = 27 + self.y_parity as u8;
        bytes
    }

    /// Accepts a recovery byte of 0, 1, 27 or 28.
    pub fn from_bytes(bytes: &[u8; 65]) -> Result<Self> {
        let y_parity = match bytes[64] {
            0 | 27 => false,
            1 | 28 => true,
            _ => return Err(EthTransactionError::InvalidSignature("recovery byte out of range")),
        };
        Ok(Self { r: U256::from_big_endian(&bytes[..32]), s: U256::from_big_endian(&bytes[32..64]), y_parity })
    }

    /// Compact 64-byte `r ‖ s`.
    pub(crate) fn to_compact(self) -> [u8; 64] {
        let mut compact = [0u8; 64];
        self.r.to_big_endian(&mut compact[..32]);
        self.s.to_big_endian(&mut compact[32..]);
        compact
    }

    /// `[v, r, s]` as appended to a signed transaction.
    pub(crate) fn rlp_fields(&self, v: u64) -> [RlpItem; 3] {
        [RlpItem::u64(v), RlpItem::uint(self.r), RlpItem::uint(self.s)]
    }

    pub(crate) fn from_rlp_fields(v: &RlpItem, r: &RlpItem, s: &RlpItem) -> Result<(u64, U256, U256)> {
        Ok((v.as_u64()?, r.as_u256()?, s.as_u256()?))
    }
}

pub(crate) fn parity_from_u64(value: u64) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(EthTransactionError::InvalidSignature("y parity must be 0 or 1")),
    }
}
