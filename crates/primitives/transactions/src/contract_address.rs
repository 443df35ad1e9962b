//! Address derivation of contracts deployed by `deploy` syscalls and deploy account transactions.

use dp_felt::{FieldElement, U256};
use dp_hashers::HasherT;

/// `"STARKNET_CONTRACT_ADDRESS"` as a short string.
pub const CONTRACT_ADDRESS_PREFIX: FieldElement =
    FieldElement::from_raw([0x5f41_4444_5245_5353, 0x434f_4e54_5241_4354, 0x5441_524b_4e45_545f, 0x53]);

/// Addresses live below `2^251 - 256`.
pub const L2_ADDRESS_UPPER_BOUND: U256 = U256([0xffff_ffff_ffff_ff00, u64::MAX, u64::MAX, 0x07ff_ffff_ffff_ffff]);

/// `hash([prefix, deployer, salt, class_hash, hash(constructor_calldata)]) mod (2^251 - 256)`
///
/// `deployer_address` is zero for deploy account transactions.
pub fn calculate_contract_address<H: HasherT>(
    salt: FieldElement,
    class_hash: FieldElement,
    constructor_calldata: &[FieldElement],
    deployer_address: FieldElement,
) -> FieldElement {
    let constructor_calldata_hash = H::compute_hash_on_elements(constructor_calldata);
    let raw_address = H::compute_hash_on_elements(&[
        CONTRACT_ADDRESS_PREFIX,
        deployer_address,
        salt,
        class_hash,
        constructor_calldata_hash,
    ])
    .to_u256();

    // Any felt is below twice the bound, one subtraction reduces it.
    if raw_address >= L2_ADDRESS_UPPER_BOUND {
        FieldElement::from_u256(raw_address - L2_ADDRESS_UPPER_BOUND)
    } else {
        FieldElement::from_u256(raw_address)
    }
}
