//! Snapshot encoding.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! MAGIC "ULTN" | schema u32 | version u64
//! config flag u8 [admin 32 | hash u8 | policy u8 | max_depth u8]
//! root_count u32 { root 32 | slot u64 | authority 32 }*
//! node_count u32 { owner 32 | tx_hash 32 | index u32 | root 32
//!                  | tx_count u32 | uptime u32 | rewards_claimed u64 }*
//! receipt_count u32 { owner 32 | tx_hash 32 }*
//! ```
//!
//! Roots, nodes and receipts are written in address order.

use alloc::vec::Vec;
use byteorder::{ByteOrder, LittleEndian};

use crate::state::kernel::KernelState;

pub const MAGIC: &[u8; 4] = b"ULTN";
pub const SCHEMA_VERSION: u32 = 2;

fn write_u8(out: &mut Vec<u8>, val: u8) {
    out.push(val);
}

fn write_u32(out: &mut Vec<u8>, val: u32) {
    let mut buf = [0u8; 4];
    LittleEndian::write_u32(&mut buf, val);
    out.extend_from_slice(&buf);
}

fn write_u64(out: &mut Vec<u8>, val: u64) {
    let mut buf = [0u8; 8];
    LittleEndian::write_u64(&mut buf, val);
    out.extend_from_slice(&buf);
}

pub fn encode_state(state: &KernelState) -> Vec<u8> {
    let mut out = Vec::new();

    out.extend_from_slice(MAGIC);
    write_u32(&mut out, SCHEMA_VERSION);
    write_u64(&mut out, state.version.0);

    match &state.config {
        Some(cfg) => {
            write_u8(&mut out, 1);
            out.extend_from_slice(cfg.admin.as_bytes());
            write_u8(&mut out, cfg.hash as u8);
            write_u8(&mut out, cfg.publish_policy as u8);
            write_u8(&mut out, cfg.max_proof_depth);
        }
        None => write_u8(&mut out, 0),
    }

    write_u32(&mut out, state.registry.len() as u32);
    for (_, entry) in state.registry.iter() {
        out.extend_from_slice(&entry.root);
        write_u64(&mut out, entry.slot);
        out.extend_from_slice(entry.authority.as_bytes());
    }

    write_u32(&mut out, state.nodes.len() as u32);
    for (_, node) in state.nodes.iter() {
        out.extend_from_slice(node.owner.as_bytes());
        out.extend_from_slice(&node.tx_hash);
        write_u32(&mut out, node.index);
        out.extend_from_slice(&node.root);
        write_u32(&mut out, node.tx_count);
        write_u32(&mut out, node.uptime);
        write_u64(&mut out, node.rewards_claimed);
    }

    write_u32(&mut out, state.nodes.receipt_count() as u32);
    for (_, receipt) in state.nodes.receipts() {
        out.extend_from_slice(receipt.owner.as_bytes());
        out.extend_from_slice(&receipt.tx_hash);
    }

    out
}
