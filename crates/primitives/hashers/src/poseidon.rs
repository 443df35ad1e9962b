//! Poseidon hash module.
use dp_felt::FieldElement;
use starknet_crypto::{poseidon_hash, poseidon_hash_many};

use super::HasherT;
use crate::{from_stark_felt, to_stark_felt};

/// The poseidon hasher.
#[derive(Clone, Copy, Debug, Default)]
pub struct PoseidonHasher;

impl HasherT for PoseidonHasher {
    fn hash_elements(a: FieldElement, b: FieldElement) -> FieldElement {
        from_stark_felt(poseidon_hash(to_stark_felt(&a), to_stark_felt(&b)))
    }

    fn compute_hash_on_elements(elements: &[FieldElement]) -> FieldElement {
        let elements = elements.iter().map(to_stark_felt).collect::<Vec<_>>();
        from_stark_felt(poseidon_hash_many(&elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn felt(value: &str) -> FieldElement {
        FieldElement::from_hex_be(value).unwrap()
    }

    // Test data generated from `cairo-lang` v0.11.0
    #[test]
    fn poseidon_pair_hash() {
        assert_eq!(
            PoseidonHasher::hash_elements(
                felt("0xb662f9017fa7956fd70e26129b1833e10ad000fd37b4d9f4e0ce6884b7bbe"),
                felt("0x1fe356bf76102cdae1bfbdc173602ead228b12904c00dad9cf16e035468bea"),
            ),
            felt("0x75540825a6ecc5dc7d7c2f5f868164182742227f1367d66c43ee51ec7937a81")
        );
    }

    #[test]
    fn poseidon_hash_many() {
        let elements = [
            felt("0xbdace8883922662601b2fd197bb660b081fcf383ede60725bd080d4b5f2fd3"),
            felt("0x1eb1daaf3fdad326b959dec70ced23649cdf8786537cee0c5758a1a4229097"),
            felt("0x869ca04071b779d6f940cdf33e62d51521e19223ab148ef571856ff3a44ff1"),
            felt("0x533e6df8d7c4b634b1f27035c8676a7439c635e1fea356484de7f0de677930"),
        ];
        assert_eq!(
            PoseidonHasher::compute_hash_on_elements(&elements),
            felt("0x2520b8f910174c3e650725baacad4efafaae7623c69a0b5513d75e500f36624")
        );
    }

    #[test]
    fn hash_many_is_deterministic_and_order_sensitive() {
        let forward = PoseidonHasher::compute_hash_on_elements(&[FieldElement::ONE, FieldElement::TWO]);
        let again = PoseidonHasher::compute_hash_on_elements(&[FieldElement::ONE, FieldElement::TWO]);
        let backward = PoseidonHasher::compute_hash_on_elements(&[FieldElement::TWO, FieldElement::ONE]);

        assert_eq!(forward, again);
        assert_ne!(forward, backward);
    }

    #[test]
    fn hash_many_does_not_append_length() {
        let empty = PoseidonHasher::compute_hash_on_elements(&[]);
        let zero = PoseidonHasher::compute_hash_on_elements(&[FieldElement::ZERO]);
        assert_ne!(empty, zero);
        assert_ne!(PoseidonHasher::hash_elements(FieldElement::ONE, FieldElement::TWO), FieldElement::ZERO);
    }
}
