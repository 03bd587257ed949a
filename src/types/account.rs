// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Stored account records.

use serde::{Deserialize, Serialize};

use crate::config::MAX_PROOF_DEPTH;
use crate::error::{KernelError, Result};
use crate::types::enums::{HashKind, PublishPolicy};
use crate::types::id::{Hash32, Identity};

/// Parameters supplied to `initialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitParams {
    pub hash: HashKind,
    pub publish_policy: PublishPolicy,
    pub max_proof_depth: u8,
}

impl Default for InitParams {
    fn default() -> Self {
        Self {
            hash: HashKind::Sha256,
            publish_policy: PublishPolicy::Open,
            max_proof_depth: MAX_PROOF_DEPTH,
        }
    }
}

/// Process-wide configuration produced once by `initialize` and handed to
/// every registry and verifier call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramConfig {
    pub admin: Identity,
    pub hash: HashKind,
    pub publish_policy: PublishPolicy,
    pub max_proof_depth: u8,
}

impl ProgramConfig {
    pub fn initialize(admin: Identity, params: InitParams) -> Result<Self> {
        if params.max_proof_depth == 0 || params.max_proof_depth > MAX_PROOF_DEPTH {
            return Err(KernelError::InvalidInput);
        }
        Ok(Self {
            admin,
            hash: params.hash,
            publish_policy: params.publish_policy,
            max_proof_depth: params.max_proof_depth,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedRoot {
    pub root: Hash32,
    pub slot: u64,
    pub authority: Identity,
}

/// Marks a transaction hash as already accepted for an owner. Receipts are
/// never removed, so a claim does not reopen old proofs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofReceipt {
    pub owner: Identity,
    pub tx_hash: Hash32,
}

/// Per-owner record of the latest verified submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub owner: Identity,
    pub tx_hash: Hash32,
    pub index: u32,
    pub root: Hash32,
    /// Verified submissions since the last reward claim.
    pub tx_count: u32,
    /// Uptime ticks since the last reward claim.
    pub uptime: u32,
    pub rewards_claimed: u64,
}

impl NodeRecord {
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            tx_hash: [0u8; 32],
            index: 0,
            root: [0u8; 32],
            tx_count: 0,
            uptime: 0,
            rewards_claimed: 0,
        }
    }
}
