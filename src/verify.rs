//! Deterministic hashing and verification.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::state::kernel::KernelState;

/// Computes the canonical BLAKE3 hash of the kernel state.
///
/// Input order: version, config (presence marker then fields), then roots,
/// node records and proof receipts, each in address order with their address. Node-level
/// metadata such as snapshot paths or HTTP state is not covered.
pub fn kernel_state_hash(state: &KernelState) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();

    hasher.update(&state.version.0.to_le_bytes());

    match &state.config {
        Some(cfg) => {
            hasher.update(&[1]);
            hasher.update(cfg.admin.as_bytes());
            hasher.update(&[cfg.hash as u8, cfg.publish_policy as u8, cfg.max_proof_depth]);
        }
        None => {
            hasher.update(&[0]);
        }
    }

    hasher.update(&(state.registry.len() as u32).to_le_bytes());
    for (addr, entry) in state.registry.iter() {
        hasher.update(&addr.0);
        hasher.update(&entry.root);
        hasher.update(&entry.slot.to_le_bytes());
        hasher.update(entry.authority.as_bytes());
    }

    hasher.update(&(state.nodes.len() as u32).to_le_bytes());
    for (addr, node) in state.nodes.iter() {
        hasher.update(&addr.0);
        hasher.update(node.owner.as_bytes());
        hasher.update(&node.tx_hash);
        hasher.update(&node.index.to_le_bytes());
        hasher.update(&node.root);
        hasher.update(&node.tx_count.to_le_bytes());
        hasher.update(&node.uptime.to_le_bytes());
        hasher.update(&node.rewards_claimed.to_le_bytes());
    }

    hasher.update(&(state.nodes.receipt_count() as u32).to_le_bytes());
    for (addr, receipt) in state.nodes.receipts() {
        hasher.update(&addr.0);
        hasher.update(receipt.owner.as_bytes());
        hasher.update(&receipt.tx_hash);
    }

    *hasher.finalize().as_bytes()
}

pub fn snapshot_hash(snapshot_bytes: &[u8]) -> [u8; 32] {
    blake3::hash(snapshot_bytes).into()
}

pub fn event_log_hash(log_bytes: &[u8]) -> [u8; 32] {
    blake3::hash(log_bytes).into()
}
