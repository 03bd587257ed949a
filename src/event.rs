// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Event log as primary truth.
//!
//! Every state transition is expressed as a `KernelEvent`: the proven
//! signer plus the command it authorized. Events carry no timestamps and no
//! derived data, so the same event sequence yields the same state on any
//! architecture.

use serde::{Deserialize, Serialize};

use crate::state::command::Command;
use crate::types::id::Identity;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelEvent {
    pub signer: Identity,
    pub command: Command,
}

impl KernelEvent {
    pub fn new(signer: Identity, command: Command) -> Self {
        Self { signer, command }
    }

    pub fn event_type(&self) -> &'static str {
        self.command.name()
    }
}
