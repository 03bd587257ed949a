// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod hasher;
pub mod tree;
pub mod path;

pub use hasher::{hash_pair, leaf_hash};
pub use path::{compute_root, index_in_range, verify_path, MerkleProof};
pub use tree::{build_root, generate_proof};
