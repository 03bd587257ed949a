// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::{initialized, ADMIN, ALICE, BOB};
use crate::error::KernelError;
use crate::state::command::Command;
use crate::state::kernel::{KernelState, Outcome};
use crate::types::account::InitParams;
use crate::types::enums::PublishPolicy;

fn publish(root: [u8; 32], slot: u64) -> Command {
    Command::PublishRoot { root, slot, authority: ALICE }
}

#[test]
fn test_publish_stores_entry() {
    let mut state = initialized(InitParams::default());
    let out = state.apply(ALICE, &publish([2u8; 32], 7)).unwrap();

    match out {
        Outcome::RootPublished(entry) => {
            assert_eq!(entry.root, [2u8; 32]);
            assert_eq!(entry.slot, 7);
            assert_eq!(entry.authority, ALICE);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(state.get_root(&[2u8; 32]).unwrap().slot, 7);
    assert_eq!(state.version(), 2);
}

#[test]
fn test_duplicate_root_rejected_and_slot_kept() {
    let mut state = initialized(InitParams::default());
    state.apply(ALICE, &publish([9u8; 32], 10)).unwrap();

    let err = state.apply(ALICE, &publish([9u8; 32], 99)).unwrap_err();
    assert_eq!(err, KernelError::DuplicateRoot);
    assert_eq!(state.get_root(&[9u8; 32]).unwrap().slot, 10);
    assert_eq!(state.registry().len(), 1);
}

#[test]
fn test_duplicate_from_other_authority_rejected() {
    let mut state = initialized(InitParams::default());
    state.apply(ALICE, &publish([9u8; 32], 10)).unwrap();

    let cmd = Command::PublishRoot { root: [9u8; 32], slot: 11, authority: BOB };
    assert_eq!(state.apply(BOB, &cmd), Err(KernelError::DuplicateRoot));
    assert_eq!(state.get_root(&[9u8; 32]).unwrap().authority, ALICE);
}

#[test]
fn test_authority_must_be_signer() {
    let mut state = initialized(InitParams::default());
    let err = state.apply(BOB, &publish([1u8; 32], 1)).unwrap_err();
    assert_eq!(err, KernelError::Unauthorized);
    assert!(state.get_root(&[1u8; 32]).is_none());
    assert_eq!(state.version(), 1);
}

#[test]
fn test_admin_only_policy() {
    let params = InitParams { publish_policy: PublishPolicy::AdminOnly, ..InitParams::default() };
    let mut state = initialized(params);

    assert_eq!(
        state.apply(ALICE, &publish([1u8; 32], 1)),
        Err(KernelError::Unauthorized)
    );

    let cmd = Command::PublishRoot { root: [1u8; 32], slot: 1, authority: ADMIN };
    assert!(state.apply(ADMIN, &cmd).is_ok());
}

#[test]
fn test_publish_before_initialize() {
    let mut state = KernelState::new();
    assert_eq!(
        state.apply(ALICE, &publish([1u8; 32], 1)),
        Err(KernelError::NotInitialized)
    );
}

#[test]
fn test_initialize_once() {
    let mut state = initialized(InitParams::default());
    let again = Command::Initialize { admin: ADMIN, params: InitParams::default() };
    assert_eq!(state.apply(ADMIN, &again), Err(KernelError::AlreadyInitialized));
}

#[test]
fn test_initialize_requires_admin_signer() {
    let mut state = KernelState::new();
    let cmd = Command::Initialize { admin: ADMIN, params: InitParams::default() };
    assert_eq!(state.apply(ALICE, &cmd), Err(KernelError::Unauthorized));
    assert!(state.config().is_none());
}

#[test]
fn test_initialize_rejects_bad_depth() {
    let mut state = KernelState::new();
    for depth in [0u8, 33] {
        let params = InitParams { max_proof_depth: depth, ..InitParams::default() };
        let cmd = Command::Initialize { admin: ADMIN, params };
        assert_eq!(state.apply(ADMIN, &cmd), Err(KernelError::InvalidInput));
    }
}
