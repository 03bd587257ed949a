//! Deterministic storage addressing.
//!
//! An address is `blake3(len(seed_0) ‖ seed_0 ‖ … ‖ len(seed_n) ‖ seed_n)`
//! with each length as a little-endian `u32`. Length prefixes keep
//! `["ab", "c"]` and `["a", "bc"]` apart.

use crate::config::{ACCEPTED_SEED, CONFIG_SEED, NODE_SEED, RECEIPT_SEED};
use crate::types::id::{Address, Hash32, Identity};

pub fn derive_address(seeds: &[&[u8]]) -> Address {
    let mut hasher = blake3::Hasher::new();
    for seed in seeds {
        hasher.update(&(seed.len() as u32).to_le_bytes());
        hasher.update(seed);
    }
    Address(*hasher.finalize().as_bytes())
}

pub fn config_address() -> Address {
    derive_address(&[CONFIG_SEED])
}

pub fn accepted_address(root: &Hash32) -> Address {
    derive_address(&[ACCEPTED_SEED, root])
}

pub fn node_address(owner: &Identity) -> Address {
    derive_address(&[NODE_SEED, owner.as_bytes()])
}

pub fn receipt_address(owner: &Identity, tx_hash: &Hash32) -> Address {
    derive_address(&[RECEIPT_SEED, owner.as_bytes(), tx_hash])
}
