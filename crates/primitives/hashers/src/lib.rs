//! Traits for hashing.
//!
//! [`HasherT`] is the field hash capability consumed by the Starknet transaction model and
//! by SNIP-12 typed data. The permutations themselves come from `starknet-crypto`, this crate
//! only binds them to [`FieldElement`].
pub mod keccak;
pub mod pedersen;
pub mod poseidon;

use dp_felt::FieldElement;
pub use keccak::{get_selector_from_name, keccak256, starknet_keccak};
use starknet_ff::FieldElement as StarkFieldElement;

/// A trait for hashing field elements.
pub trait HasherT {
    /// Hashes the 2 felts sent.
    ///
    /// # Arguments
    ///
    /// * `a` - First element to hash.
    /// * `b` - Second element to hash.
    ///
    /// # Returns
    ///
    /// The hash of the 2 values.
    fn hash_elements(a: FieldElement, b: FieldElement) -> FieldElement;

    /// Hashes a sequence of field elements into a single one.
    ///
    /// Pedersen computes a length terminated hash chain, Poseidon absorbs the whole
    /// sequence in its sponge.
    ///
    /// # Arguments
    ///
    /// * `elements` - The elements to hash.
    ///
    /// # Returns
    ///
    /// The hash of the array.
    fn compute_hash_on_elements(elements: &[FieldElement]) -> FieldElement;
}

pub(crate) fn to_stark_felt(felt: &FieldElement) -> StarkFieldElement {
    // Safe to unwrap because both types share the same modulus and `felt` is canonical.
    StarkFieldElement::from_bytes_be(&felt.to_bytes_be()).unwrap()
}

pub(crate) fn from_stark_felt(felt: StarkFieldElement) -> FieldElement {
    FieldElement::from_bytes_be(&felt.to_bytes_be())
}
