// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod registry_tests;
pub mod snapshot_tests;
pub mod replay_tests;

use crate::state::command::Command;
use crate::state::kernel::KernelState;
use crate::types::account::InitParams;
use crate::types::id::Identity;

pub(crate) const ADMIN: Identity = Identity([0xAA; 32]);
pub(crate) const ALICE: Identity = Identity([0x01; 32]);
pub(crate) const BOB: Identity = Identity([0x02; 32]);

pub(crate) fn initialized(params: InitParams) -> KernelState {
    let mut state = KernelState::new();
    state
        .apply(ADMIN, &Command::Initialize { admin: ADMIN, params })
        .unwrap();
    state
}
