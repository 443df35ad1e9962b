//! Pedersen hash module.
use dp_felt::FieldElement;
use starknet_crypto::pedersen_hash;

use super::HasherT;
use crate::{from_stark_felt, to_stark_felt};

/// The Pedersen hasher.
#[derive(Clone, Copy, Debug, Default)]
pub struct PedersenHasher;

/// The Pedersen hasher implementation.
impl HasherT for PedersenHasher {
    #[inline(always)]
    fn hash_elements(a: FieldElement, b: FieldElement) -> FieldElement {
        from_stark_felt(pedersen_hash(&to_stark_felt(&a), &to_stark_felt(&b)))
    }

    /// Computes a hash chain over the data, in the following order:
    /// h(h(h(h(0, data\[0\]), data\[1\]), ...), data\[n-1\]), n).
    /// The hash is initialized with 0 and ends with the data length appended.
    /// The length is appended in order to avoid collisions of the following kind:
    /// H(\[x,y,z\]) = h(h(x,y),z) = H(\[w, z\]) where w = h(x,y).
    fn compute_hash_on_elements(elements: &[FieldElement]) -> FieldElement {
        let chain = elements.iter().fold(FieldElement::ZERO, |acc, e| Self::hash_elements(acc, *e));
        Self::hash_elements(chain, FieldElement::from(elements.len()))
    }
}
