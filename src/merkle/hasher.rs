// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Pairwise node hashing.

use sha2::{Digest, Sha256};

use crate::types::enums::HashKind;
use crate::types::id::Hash32;

/// Combine two child nodes into their parent: `H(left ‖ right)`.
pub fn hash_pair(kind: HashKind, left: &Hash32, right: &Hash32) -> Hash32 {
    match kind {
        HashKind::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(left);
            hasher.update(right);
            hasher.finalize().into()
        }
        HashKind::Blake3 => {
            let mut hasher = blake3::Hasher::new();
            hasher.update(left);
            hasher.update(right);
            *hasher.finalize().as_bytes()
        }
    }
}

/// Hash raw leaf data into a tree leaf.
pub fn leaf_hash(kind: HashKind, data: &[u8]) -> Hash32 {
    match kind {
        HashKind::Sha256 => Sha256::digest(data).into(),
        HashKind::Blake3 => *blake3::hash(data).as_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_order_matters() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        for kind in [HashKind::Sha256, HashKind::Blake3] {
            assert_ne!(hash_pair(kind, &a, &b), hash_pair(kind, &b, &a));
        }
    }

    #[test]
    fn test_sha256_known_vector() {
        // sha256("abc")
        let expected = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(leaf_hash(HashKind::Sha256, b"abc"), expected);
    }

    #[test]
    fn test_kinds_disagree() {
        let a = [7u8; 32];
        assert_ne!(
            hash_pair(HashKind::Sha256, &a, &a),
            hash_pair(HashKind::Blake3, &a, &a)
        );
    }
}
