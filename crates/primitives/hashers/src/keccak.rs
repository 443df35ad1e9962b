//! Keccak-256 as used by Ethereum and its 250-bit Starknet truncation.
use dp_felt::FieldElement;
use primitive_types::H256;
use sha3::{Digest, Keccak256};

const DEFAULT_ENTRY_POINT_NAME: &str = "__default__";
const DEFAULT_L1_ENTRY_POINT_NAME: &str = "__l1_default__";

/// Keccak-256 digest of `data`.
pub fn keccak256(data: impl AsRef<[u8]>) -> H256 {
    H256::from_slice(&Keccak256::digest(data.as_ref()))
}

/// Keccak-256 of `data` with the 6 most significant bits cleared, so it fits in a felt.
pub fn starknet_keccak(data: &[u8]) -> FieldElement {
    let mut hash = keccak256(data).to_fixed_bytes();
    hash[0] &= 0b0000_0011;
    FieldElement::from_bytes_be(&hash)
}

/// Entry point selector of a Starknet function name.
pub fn get_selector_from_name(name: &str) -> FieldElement {
    if name == DEFAULT_ENTRY_POINT_NAME || name == DEFAULT_L1_ENTRY_POINT_NAME {
        FieldElement::ZERO
    } else {
        starknet_keccak(name.as_bytes())
    }
}
