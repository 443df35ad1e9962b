//! Merkle trees over felts, as used by `merkletree` members.
//!
//! Pairs are sorted before hashing and an odd node is paired with zero.

use dp_felt::FieldElement;
use dp_hashers::HasherT;

use crate::{Result, TypedDataError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    pub leaves: Vec<FieldElement>,
    /// Every level from the leaves (excluded) up to the root (included).
    pub branches: Vec<Vec<FieldElement>>,
    pub root: FieldElement,
}

impl MerkleTree {
    pub fn new<H: HasherT>(leaves: Vec<FieldElement>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(TypedDataError::EmptyMerkleTree);
        }
        let mut branches = Vec::new();
        let mut level = leaves.clone();
        while level.len() > 1 {
            level = level
                .chunks(2)
                .map(|pair| hash_pair::<H>(pair[0], pair.get(1).copied().unwrap_or(FieldElement::ZERO)))
                .collect();
            branches.push(level.clone());
        }
        let root = level[0];
        Ok(Self { leaves, branches, root })
    }

    /// Sibling path of `leaf`, from the bottom up. `None` if the leaf is not in the tree.
    pub fn proof(&self, leaf: &FieldElement) -> Option<Vec<FieldElement>> {
        let mut index = self.leaves.iter().position(|candidate| candidate == leaf)?;
        let mut proof = Vec::with_capacity(self.branches.len());
        let levels = core::iter::once(&self.leaves).chain(self.branches.iter());
        for level in levels.take(self.branches.len()) {
            proof.push(level.get(index ^ 1).copied().unwrap_or(FieldElement::ZERO));
            index /= 2;
        }
        Some(proof)
    }
}

/// Checks that `proof` leads from `leaf` to `root`.
pub fn verify_proof<H: HasherT>(root: FieldElement, leaf: FieldElement, proof: &[FieldElement]) -> bool {
    proof.iter().fold(leaf, |node, sibling| hash_pair::<H>(node, *sibling)) == root
}

fn hash_pair<H: HasherT>(a: FieldElement, b: FieldElement) -> FieldElement {
    if a <= b { H::hash_elements(a, b) } else { H::hash_elements(b, a) }
}
