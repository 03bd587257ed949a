// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::vec::Vec;

use super::{ADMIN, ALICE, BOB};
use crate::error::KernelError;
use crate::event::KernelEvent;
use crate::merkle::{build_root, generate_proof, leaf_hash};
use crate::replay::{replay_and_hash, replay_state, EventLogHeader};
use crate::snapshot::encode_state;
use crate::state::command::Command;
use crate::state::kernel::KernelState;
use crate::types::account::InitParams;
use crate::types::enums::HashKind;
use crate::verify::kernel_state_hash;

fn script() -> Vec<KernelEvent> {
    let kind = HashKind::Sha256;
    let l: Vec<_> = ["a", "b", "c"].iter().map(|d| leaf_hash(kind, d.as_bytes())).collect();
    let root = build_root(kind, &l).unwrap();

    vec![
        KernelEvent::new(ADMIN, Command::Initialize { admin: ADMIN, params: InitParams::default() }),
        KernelEvent::new(ALICE, Command::PublishRoot { root, slot: 42, authority: ALICE }),
        KernelEvent::new(
            BOB,
            Command::SubmitVerifiedProof {
                tx_hash: l[2],
                root,
                index: 2,
                siblings: generate_proof(kind, &l, 2).unwrap(),
                submitter: BOB,
            },
        ),
        KernelEvent::new(BOB, Command::RecordUptime { owner: BOB }),
        KernelEvent::new(BOB, Command::ClaimRewards { owner: BOB }),
    ]
}

fn encode_log(events: &[KernelEvent]) -> Vec<u8> {
    let mut buf = EventLogHeader::default().to_bytes().to_vec();
    for ev in events {
        let bytes = bincode::serde::encode_to_vec(ev, bincode::config::standard()).unwrap();
        buf.extend_from_slice(&bytes);
    }
    buf
}

fn live(events: &[KernelEvent]) -> KernelState {
    let mut state = KernelState::new();
    for ev in events {
        state.apply_event(ev).unwrap();
    }
    state
}

#[test]
fn test_replay_matches_live() {
    let events = script();
    let expected = kernel_state_hash(&live(&events));

    let hash = replay_and_hash(&[], &encode_log(&events)).unwrap();
    assert_eq!(hash, expected);
}

#[test]
fn test_snapshot_plus_tail() {
    let events = script();
    let base = live(&events[..2]);
    let snapshot = encode_state(&base);

    let (state, count) = replay_state(&snapshot, &encode_log(&events)).unwrap();
    assert_eq!(count, events.len() as u64);
    assert_eq!(state.version(), events.len() as u64);
    assert_eq!(kernel_state_hash(&state), kernel_state_hash(&live(&events)));
}

#[test]
fn test_snapshot_only() {
    let events = script();
    let state = live(&events);
    let snapshot = encode_state(&state);
    assert_eq!(
        replay_and_hash(&snapshot, &encode_log(&events)).unwrap(),
        kernel_state_hash(&state)
    );
}

#[test]
fn test_snapshot_ahead_of_log() {
    let events = script();
    let snapshot = encode_state(&live(&events));
    assert_eq!(
        replay_and_hash(&snapshot, &encode_log(&events[..1])),
        Err(KernelError::InvalidInput)
    );
}

#[test]
fn test_empty_log_is_empty_state() {
    assert_eq!(
        replay_and_hash(&[], &[]).unwrap(),
        kernel_state_hash(&KernelState::new())
    );
}

#[test]
fn test_bad_header_rejected() {
    let mut log = encode_log(&script());
    log[0] = 9;
    assert_eq!(replay_and_hash(&[], &log), Err(KernelError::InvalidInput));
}

#[test]
fn test_rejected_event_fails_replay() {
    let mut events = script();
    events.push(KernelEvent::new(ALICE, Command::RecordUptime { owner: BOB }));
    assert_eq!(
        replay_and_hash(&[], &encode_log(&events)),
        Err(KernelError::Unauthorized)
    );
}

#[test]
fn test_torn_tail_ignored() {
    let events = script();
    let mut log = encode_log(&events);
    log.truncate(log.len() - 3);

    let (state, count) = replay_state(&[], &log).unwrap();
    assert_eq!(count, events.len() as u64 - 1);
    assert_eq!(kernel_state_hash(&state), kernel_state_hash(&live(&events[..events.len() - 1])));
}

#[test]
fn test_garbage_mid_log_rejected() {
    let events = script();
    let mut log = encode_log(&events[..1]);
    // Invalid Command variant tag after a complete signer.
    log.extend_from_slice(&[0u8; 32]);
    log.push(0x7F);
    log.extend_from_slice(&encode_log(&events[1..])[EventLogHeader::SIZE..]);
    assert_eq!(replay_and_hash(&[], &log), Err(KernelError::InvalidInput));
}

#[test]
fn test_header_round_trip() {
    let bytes = EventLogHeader::default().to_bytes();
    let (header, rest) = EventLogHeader::read(&bytes).unwrap();
    assert_eq!(header, EventLogHeader::default());
    assert!(rest.is_empty());
}
