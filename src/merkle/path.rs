// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Sibling path recomputation.

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::merkle::hasher::hash_pair;
use crate::types::enums::HashKind;
use crate::types::id::Hash32;

/// Recompute the root reached from `leaf` by walking `siblings`.
///
/// Bit `k` of `index` (LSB first) places the running hash on the left (0)
/// or right (1) at level `k`.
pub fn compute_root(kind: HashKind, leaf: &Hash32, index: u32, siblings: &[Hash32]) -> Hash32 {
    let mut computed = *leaf;
    let mut idx = index;
    for sibling in siblings {
        computed = if idx & 1 == 0 {
            hash_pair(kind, &computed, sibling)
        } else {
            hash_pair(kind, sibling, &computed)
        };
        idx >>= 1;
    }
    computed
}

/// True when `index` addresses a leaf of a tree `depth` levels deep, i.e. it
/// has no set bits at or above `depth`.
pub fn index_in_range(index: u32, depth: usize) -> bool {
    depth >= u32::BITS as usize || index >> depth == 0
}

pub fn verify_path(kind: HashKind, leaf: &Hash32, root: &Hash32, index: u32, siblings: &[Hash32]) -> bool {
    index_in_range(index, siblings.len()) && compute_root(kind, leaf, index, siblings) == *root
}

/// A membership claim: leaf, its position and the path to the root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    pub leaf: Hash32,
    pub index: u32,
    pub siblings: Vec<Hash32>,
}

impl MerkleProof {
    pub fn root(&self, kind: HashKind) -> Hash32 {
        compute_root(kind, &self.leaf, self.index, &self.siblings)
    }

    pub fn depth(&self) -> usize {
        self.siblings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::hasher::leaf_hash;
    use crate::merkle::tree::{build_root, generate_proof};

    fn leaves(data: &[&str], kind: HashKind) -> Vec<Hash32> {
        data.iter().map(|d| leaf_hash(kind, d.as_bytes())).collect()
    }

    #[test]
    fn test_all_leaf_indices() {
        for kind in [HashKind::Sha256, HashKind::Blake3] {
            let l = leaves(&["a", "b", "c", "d", "e", "f", "g"], kind);
            let root = build_root(kind, &l).unwrap();
            for i in 0..l.len() as u32 {
                let path = generate_proof(kind, &l, i).unwrap();
                assert!(
                    verify_path(kind, &l[i as usize], &root, i, &path),
                    "Proof failed at index {} ({})",
                    i,
                    kind.name()
                );
            }
        }
    }

    #[test]
    fn test_swapped_path_fails() {
        let l = leaves(&["a", "b", "c", "d"], HashKind::Sha256);
        let root = build_root(HashKind::Sha256, &l).unwrap();
        let bad = vec![l[2], l[3]];
        assert!(!verify_path(HashKind::Sha256, &l[0], &root, 0, &bad));
    }

    #[test]
    fn test_wrong_index_fails() {
        let l = leaves(&["a", "b", "c", "d"], HashKind::Sha256);
        let root = build_root(HashKind::Sha256, &l).unwrap();
        let path = generate_proof(HashKind::Sha256, &l, 1).unwrap();
        assert!(!verify_path(HashKind::Sha256, &l[1], &root, 0, &path));
    }

    #[test]
    fn test_high_index_bits_rejected() {
        let l = leaves(&["a", "b"], HashKind::Sha256);
        let root = build_root(HashKind::Sha256, &l).unwrap();
        let path = generate_proof(HashKind::Sha256, &l, 0).unwrap();
        // Same low bit as index 0, so the recomputed root still matches.
        assert_eq!(compute_root(HashKind::Sha256, &l[0], 0xFFFF_FFFE, &path), root);
        assert!(!verify_path(HashKind::Sha256, &l[0], &root, 0xFFFF_FFFE, &path));
        assert!(verify_path(HashKind::Sha256, &l[0], &root, 0, &path));
    }

    #[test]
    fn test_index_range_bounds() {
        assert!(index_in_range(0, 0));
        assert!(!index_in_range(1, 0));
        assert!(index_in_range(3, 2));
        assert!(!index_in_range(4, 2));
        assert!(index_in_range(u32::MAX, 32));
    }

    #[test]
    fn test_empty_path_is_identity() {
        let leaf = [9u8; 32];
        assert_eq!(compute_root(HashKind::Sha256, &leaf, 0, &[]), leaf);
    }

    #[test]
    fn test_proof_struct_root() {
        let l = leaves(&["p", "q", "r"], HashKind::Blake3);
        let root = build_root(HashKind::Blake3, &l).unwrap();
        let proof = MerkleProof {
            leaf: l[1],
            index: 1,
            siblings: generate_proof(HashKind::Blake3, &l, 1).unwrap(),
        };
        assert_eq!(proof.depth(), 2);
        assert_eq!(proof.root(HashKind::Blake3), root);
    }
}
