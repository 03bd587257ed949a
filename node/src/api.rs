// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! JSON request and response bodies. Every 32-byte value travels as a hex
//! string (an optional `0x` prefix is accepted on input).

use serde::{Deserialize, Serialize};
use ultranode_kernel::proof::DeterministicProof;
use ultranode_kernel::state::address::{accepted_address, node_address};
use ultranode_kernel::types::account::{AcceptedRoot, NodeRecord, ProgramConfig};
use ultranode_kernel::types::id::{Hash32, Identity};

use crate::errors::EngineError;

pub fn parse_hash32(field: &str, raw: &str) -> Result<Hash32, EngineError> {
    let trimmed = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(trimmed)
        .map_err(|e| EngineError::InvalidInput(format!("{}: {}", field, e)))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| EngineError::InvalidInput(format!("{}: expected 32 bytes, got {}", field, b.len())))
}

pub fn parse_identity(field: &str, raw: &str) -> Result<Identity, EngineError> {
    parse_hash32(field, raw).map(Identity)
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct InitializeRequest {
    pub admin: String,
    /// `sha256` (default) or `blake3`.
    pub hash: Option<String>,
    /// `open` (default) or `admin_only`.
    pub publish_policy: Option<String>,
    pub max_proof_depth: Option<u8>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ConfigResponse {
    pub admin: String,
    pub hash: String,
    pub publish_policy: String,
    pub max_proof_depth: u8,
}

impl From<&ProgramConfig> for ConfigResponse {
    fn from(c: &ProgramConfig) -> Self {
        Self {
            admin: hex::encode(c.admin.as_bytes()),
            hash: c.hash.name().to_string(),
            publish_policy: c.publish_policy.name().to_string(),
            max_proof_depth: c.max_proof_depth,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PublishRootRequest {
    pub root: String,
    pub slot: u64,
    /// Defaults to the signer.
    pub authority: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct AcceptedRootResponse {
    pub address: String,
    pub root: String,
    pub slot: u64,
    pub authority: String,
}

impl From<&AcceptedRoot> for AcceptedRootResponse {
    fn from(r: &AcceptedRoot) -> Self {
        Self {
            address: hex::encode(accepted_address(&r.root).0),
            root: hex::encode(r.root),
            slot: r.slot,
            authority: hex::encode(r.authority.as_bytes()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SubmitProofRequest {
    pub tx_hash: String,
    pub root: String,
    pub index: u32,
    /// Sibling hashes ordered leaf to root.
    pub proof: Vec<String>,
    /// Defaults to the signer.
    pub submitter: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct NodeRecordResponse {
    pub address: String,
    pub owner: String,
    pub tx_hash: String,
    pub index: u32,
    pub root: String,
    pub tx_count: u32,
    pub uptime: u32,
    pub rewards_claimed: u64,
}

impl From<&NodeRecord> for NodeRecordResponse {
    fn from(n: &NodeRecord) -> Self {
        Self {
            address: hex::encode(node_address(&n.owner).0),
            owner: hex::encode(n.owner.as_bytes()),
            tx_hash: hex::encode(n.tx_hash),
            index: n.index,
            root: hex::encode(n.root),
            tx_count: n.tx_count,
            uptime: n.uptime,
            rewards_claimed: n.rewards_claimed,
        }
    }
}

/// Body for uptime and claim calls. `owner` defaults to the signer.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct NodeActionRequest {
    pub owner: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ClaimResponse {
    pub owner: String,
    pub amount: u64,
    pub rewards_claimed: u64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ProofResponse {
    pub kernel_version: u64,
    pub snapshot_hash: String,
    pub event_log_hash: String,
    pub final_state_hash: String,
    pub event_count: u64,
}

impl From<&DeterministicProof> for ProofResponse {
    fn from(p: &DeterministicProof) -> Self {
        Self {
            kernel_version: p.kernel_version,
            snapshot_hash: hex::encode(p.snapshot_hash),
            event_log_hash: hex::encode(p.event_log_hash),
            final_state_hash: hex::encode(p.final_state_hash),
            event_count: p.event_count,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SnapshotSaveRequest {
    pub path: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SnapshotSaveResponse {
    pub success: bool,
    pub path: String,
    pub size_bytes: u64,
}
