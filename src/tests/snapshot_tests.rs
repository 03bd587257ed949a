// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::{initialized, ALICE, BOB};
use crate::error::KernelError;
use crate::snapshot::{decode_state, encode_state};
use crate::state::command::Command;
use crate::state::kernel::KernelState;
use crate::types::account::InitParams;
use crate::types::enums::{HashKind, PublishPolicy};
use crate::verify::kernel_state_hash;

fn populated() -> KernelState {
    let params = InitParams {
        hash: HashKind::Blake3,
        publish_policy: PublishPolicy::Open,
        max_proof_depth: 20,
    };
    let mut state = initialized(params);
    for (i, signer) in [ALICE, BOB, ALICE].iter().enumerate() {
        let cmd = Command::PublishRoot { root: [i as u8 + 10; 32], slot: i as u64 * 3, authority: *signer };
        state.apply(*signer, &cmd).unwrap();
    }
    // Single-leaf tree: the leaf is the root.
    let cmd = Command::SubmitVerifiedProof {
        tx_hash: [10u8; 32],
        root: [10u8; 32],
        index: 0,
        siblings: vec![],
        submitter: BOB,
    };
    state.apply(BOB, &cmd).unwrap();
    state.apply(BOB, &Command::RecordUptime { owner: BOB }).unwrap();
    state
}

#[test]
fn test_snapshot_restore_matches() {
    let state = populated();
    let bytes = encode_state(&state);
    let restored = decode_state(&bytes).unwrap();

    assert_eq!(restored, state);
    assert_eq!(kernel_state_hash(&restored), kernel_state_hash(&state));
    assert_eq!(restored.get_node(&BOB).unwrap().uptime, 1);
    assert!(restored.nodes().has_receipt(&BOB, &[10u8; 32]));
}

#[test]
fn test_restored_receipt_still_blocks_replay() {
    let mut restored = decode_state(&encode_state(&populated())).unwrap();
    let cmd = Command::SubmitVerifiedProof {
        tx_hash: [10u8; 32],
        root: [10u8; 32],
        index: 0,
        siblings: vec![],
        submitter: BOB,
    };
    assert_eq!(restored.apply(BOB, &cmd), Err(KernelError::ReplayedProof));
}

#[test]
fn test_receipts_change_state_hash() {
    let state = populated();
    let mut stripped = state.clone();
    stripped.nodes.receipts.clear();
    assert_ne!(kernel_state_hash(&state), kernel_state_hash(&stripped));
}

#[test]
fn test_orphan_receipt_rejected() {
    let mut bytes = encode_state(&populated());
    // Last 64 bytes are the only receipt: point its owner at nobody.
    let owner_at = bytes.len() - 64;
    bytes[owner_at..owner_at + 32].copy_from_slice(&[0xEE; 32]);
    assert_eq!(decode_state(&bytes), Err(KernelError::InvalidInput));
}

#[test]
fn test_empty_state_snapshot() {
    let state = KernelState::new();
    let restored = decode_state(&encode_state(&state)).unwrap();
    assert!(restored.config().is_none());
    assert_eq!(restored.version(), 0);
}

#[test]
fn test_encoding_is_deterministic() {
    assert_eq!(encode_state(&populated()), encode_state(&populated()));
}

#[test]
fn test_bad_magic() {
    let mut bytes = encode_state(&populated());
    bytes[0] = b'X';
    assert_eq!(decode_state(&bytes), Err(KernelError::InvalidInput));
}

#[test]
fn test_truncated_snapshot() {
    let bytes = encode_state(&populated());
    for cut in [3usize, 16, bytes.len() - 1] {
        assert_eq!(decode_state(&bytes[..cut]), Err(KernelError::InvalidInput));
    }
}

#[test]
fn test_trailing_bytes_rejected() {
    let mut bytes = encode_state(&populated());
    bytes.push(0);
    assert_eq!(decode_state(&bytes), Err(KernelError::InvalidInput));
}
