//! Chain ids of the public Starknet networks.
//!
//! Each id is the short string encoding of the network name.

use dp_felt::FieldElement;

/// ChainId for Starknet Mainnet, `SN_MAIN`.
pub const SN_MAIN_CHAIN_ID: FieldElement = FieldElement::from_raw([0x0053_4e5f_4d41_494e, 0, 0, 0]);

/// ChainId for Starknet Sepolia testnet, `SN_SEPOLIA`.
pub const SN_SEPOLIA_CHAIN_ID: FieldElement = FieldElement::from_raw([0x5f53_4550_4f4c_4941, 0x534e, 0, 0]);

/// ChainId for Starknet Goerli testnet, `SN_GOERLI`.
pub const SN_GOERLI_CHAIN_ID: FieldElement = FieldElement::from_raw([0x4e5f_474f_4552_4c49, 0x53, 0, 0]);

/// Looks up a well-known chain id by its network name.
pub fn chain_id_from_name(name: &str) -> Option<FieldElement> {
    match name {
        "SN_MAIN" => Some(SN_MAIN_CHAIN_ID),
        "SN_SEPOLIA" => Some(SN_SEPOLIA_CHAIN_ID),
        "SN_GOERLI" => Some(SN_GOERLI_CHAIN_ID),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
