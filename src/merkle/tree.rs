// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Binary Merkle tree construction.
//!
//! Layers are built bottom-up by hashing adjacent pairs. When a layer has an
//! odd number of nodes the last node is paired with itself. A single leaf is
//! its own root.

use alloc::vec::Vec;

use crate::merkle::hasher::hash_pair;
use crate::types::enums::HashKind;
use crate::types::id::Hash32;

fn next_layer(kind: HashKind, layer: &[Hash32]) -> Vec<Hash32> {
    layer
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => hash_pair(kind, left, right),
            [only] => hash_pair(kind, only, only),
            _ => unreachable!("chunks(2) yields one or two items"),
        })
        .collect()
}

/// Root over already-hashed leaves. `None` for an empty leaf set.
pub fn build_root(kind: HashKind, leaves: &[Hash32]) -> Option<Hash32> {
    if leaves.is_empty() {
        return None;
    }
    let mut layer = leaves.to_vec();
    while layer.len() > 1 {
        layer = next_layer(kind, &layer);
    }
    Some(layer[0])
}

/// Sibling path for the leaf at `index`, ordered leaf to root.
///
/// Returns `None` when `index` is out of range.
pub fn generate_proof(kind: HashKind, leaves: &[Hash32], index: u32) -> Option<Vec<Hash32>> {
    let mut idx = index as usize;
    if idx >= leaves.len() {
        return None;
    }

    let mut path = Vec::new();
    let mut layer = leaves.to_vec();

    while layer.len() > 1 {
        let sibling = if idx % 2 == 0 {
            // Odd tail pairs with itself.
            *layer.get(idx + 1).unwrap_or(&layer[idx])
        } else {
            layer[idx - 1]
        };
        path.push(sibling);
        layer = next_layer(kind, &layer);
        idx /= 2;
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::hasher::leaf_hash;

    fn leaves(data: &[&str]) -> Vec<Hash32> {
        data.iter().map(|d| leaf_hash(HashKind::Sha256, d.as_bytes())).collect()
    }

    #[test]
    fn test_empty_has_no_root() {
        assert_eq!(build_root(HashKind::Sha256, &[]), None);
    }

    #[test]
    fn test_single_leaf_is_root() {
        let l = leaves(&["solo"]);
        assert_eq!(build_root(HashKind::Sha256, &l), Some(l[0]));
        assert_eq!(generate_proof(HashKind::Sha256, &l, 0), Some(Vec::new()));
    }

    #[test]
    fn test_two_leaves() {
        let l = leaves(&["a", "b"]);
        let expected = hash_pair(HashKind::Sha256, &l[0], &l[1]);
        assert_eq!(build_root(HashKind::Sha256, &l), Some(expected));
        assert_eq!(generate_proof(HashKind::Sha256, &l, 1), Some(vec![l[0]]));
    }

    #[test]
    fn test_odd_tail_duplicates() {
        let l = leaves(&["x", "y", "z"]);
        let left = hash_pair(HashKind::Sha256, &l[0], &l[1]);
        let right = hash_pair(HashKind::Sha256, &l[2], &l[2]);
        let root = hash_pair(HashKind::Sha256, &left, &right);
        assert_eq!(build_root(HashKind::Sha256, &l), Some(root));
        assert_eq!(generate_proof(HashKind::Sha256, &l, 2), Some(vec![l[2], left]));
    }

    #[test]
    fn test_out_of_range_index() {
        let l = leaves(&["a", "b", "c", "d"]);
        assert_eq!(generate_proof(HashKind::Sha256, &l, 4), None);
    }
}
