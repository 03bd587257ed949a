//! Deterministic replay logic.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

use bincode::error::DecodeError;
use byteorder::{ByteOrder, LittleEndian};

use crate::config::DIGEST_LEN;
use crate::error::{KernelError, Result};
use crate::event::KernelEvent;
use crate::snapshot::decode::decode_state;
use crate::state::kernel::KernelState;
use crate::verify::kernel_state_hash;

pub const EVENT_LOG_VERSION: u32 = 1;

/// Event log header (16 bytes).
/// [Version: u32][DigestLen: u32][Reserved: u64]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventLogHeader {
    pub version: u32,
    pub digest_len: u32,
    pub reserved: u64,
}

impl Default for EventLogHeader {
    fn default() -> Self {
        Self {
            version: EVENT_LOG_VERSION,
            digest_len: DIGEST_LEN as u32,
            reserved: 0,
        }
    }
}

impl EventLogHeader {
    pub const SIZE: usize = 16;

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        LittleEndian::write_u32(&mut buf[0..4], self.version);
        LittleEndian::write_u32(&mut buf[4..8], self.digest_len);
        LittleEndian::write_u64(&mut buf[8..16], self.reserved);
        buf
    }

    /// Parses and validates the header, returning the event stream after it.
    pub fn read(buf: &[u8]) -> Result<(Self, &[u8])> {
        if buf.len() < Self::SIZE {
            return Err(KernelError::InvalidInput);
        }

        let header = Self {
            version: LittleEndian::read_u32(&buf[0..4]),
            digest_len: LittleEndian::read_u32(&buf[4..8]),
            reserved: LittleEndian::read_u64(&buf[8..16]),
        };

        if header.version != EVENT_LOG_VERSION || header.digest_len != DIGEST_LEN as u32 {
            return Err(KernelError::InvalidInput);
        }

        Ok((header, &buf[Self::SIZE..]))
    }
}

/// Decode one event from the front of `slice`, returning it and the bytes
/// consumed. `None` means `slice` holds only part of an event, as left by
/// an append cut short by a crash.
pub fn decode_event(slice: &[u8]) -> Result<Option<(KernelEvent, usize)>> {
    match bincode::serde::decode_from_slice::<KernelEvent, _>(slice, bincode::config::standard()) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(DecodeError::UnexpectedEnd { .. }) => Ok(None),
        Err(_) => Err(KernelError::InvalidInput),
    }
}

/// Restores the snapshot (or an empty state) and applies the log events it
/// does not already cover. Returns the state and the total number of events
/// in the log.
///
/// The first `state.version` events are assumed to be folded into the
/// snapshot. Every remaining event must decode and apply cleanly, except a
/// partial event at the very end, which is ignored.
pub fn replay_state(snapshot_bytes: &[u8], log_bytes: &[u8]) -> Result<(KernelState, u64)> {
    let mut state = if snapshot_bytes.is_empty() {
        KernelState::new()
    } else {
        decode_state(snapshot_bytes)?
    };

    // An empty buffer is a log with no events; anything else carries a header.
    let mut slice = log_bytes;
    if !slice.is_empty() {
        let (_, rest) = EventLogHeader::read(slice)?;
        slice = rest;
    }

    let skip = state.version();
    let mut seen: u64 = 0;

    while !slice.is_empty() {
        let Some((event, read)) = decode_event(slice)? else {
            // Torn tail: everything before it is complete.
            break;
        };
        if seen >= skip {
            state.apply_event(&event)?;
        }
        seen += 1;
        slice = &slice[read..];
    }

    if seen < skip {
        // Snapshot is ahead of the log.
        return Err(KernelError::InvalidInput);
    }

    Ok((state, seen))
}

/// Replays a log on top of a base snapshot and returns the final state hash.
pub fn replay_and_hash(snapshot_bytes: &[u8], log_bytes: &[u8]) -> Result<[u8; 32]> {
    let (state, _) = replay_state(snapshot_bytes, log_bytes)?;
    Ok(kernel_state_hash(&state))
}
