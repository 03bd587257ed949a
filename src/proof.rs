//! Deterministic proof structures.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

/// Receipt binding a starting snapshot and an event log to the state they
/// produce on replay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeterministicProof {
    pub kernel_version: u64,

    /// BLAKE3 of the snapshot bytes (all zero when replay starts empty).
    pub snapshot_hash: [u8; 32],

    /// BLAKE3 of the full event log file, header included.
    pub event_log_hash: [u8; 32],

    pub final_state_hash: [u8; 32],

    /// Committed events in the log.
    pub event_count: u64,
}
