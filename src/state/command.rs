// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Kernel command definitions.

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::types::account::InitParams;
use crate::types::id::{Hash32, Identity};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Initialize {
        admin: Identity,
        params: InitParams,
    },
    PublishRoot {
        root: Hash32,
        slot: u64,
        authority: Identity,
    },
    SubmitVerifiedProof {
        tx_hash: Hash32,
        root: Hash32,
        index: u32,
        siblings: Vec<Hash32>,
        submitter: Identity,
    },
    RecordUptime {
        owner: Identity,
    },
    ClaimRewards {
        owner: Identity,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Initialize { .. } => "Initialize",
            Command::PublishRoot { .. } => "PublishRoot",
            Command::SubmitVerifiedProof { .. } => "SubmitVerifiedProof",
            Command::RecordUptime { .. } => "RecordUptime",
            Command::ClaimRewards { .. } => "ClaimRewards",
        }
    }
}
