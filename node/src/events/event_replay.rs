// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Recovery from the event log.
//!
//! The event log always wins; a snapshot only shortens replay. A snapshot
//! whose version is ahead of the log is discarded.

use std::path::Path;
use std::time::Instant;

use thiserror::Error;
use ultranode_kernel::error::KernelError;
use ultranode_kernel::event::KernelEvent;
use ultranode_kernel::state::kernel::KernelState;

use crate::events::event_journal::EventJournal;
use crate::events::event_log::{parse_header, scan_events, EventLogError};

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Log(#[from] EventLogError),

    #[error("Event {index} failed to apply: {error}")]
    EventApplication { index: u64, error: KernelError },
}

pub type Result<T> = std::result::Result<T, ReplayError>;

/// Read all complete events from a log file. A missing or empty file has no
/// events.
pub fn read_event_log(path: impl AsRef<Path>) -> Result<Vec<KernelEvent>> {
    let bytes = match std::fs::read(path.as_ref()) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let body = parse_header(&bytes)?;
    Ok(scan_events(body)?.events)
}

/// Apply `events[skip..]` on top of `state`.
pub fn replay_events(mut state: KernelState, events: &[KernelEvent], skip: usize) -> Result<KernelState> {
    for (idx, event) in events.iter().enumerate().skip(skip) {
        state.apply_event(event).map_err(|error| {
            tracing::error!("Event replay failed at index {}: {}", idx, error);
            ReplayError::EventApplication { index: idx as u64, error }
        })?;
    }
    Ok(state)
}

/// Rebuild live state and journal from the log, starting from `snapshot`
/// when it is usable.
pub fn recover_from_event_log(
    log_path: impl AsRef<Path>,
    snapshot: Option<KernelState>,
) -> Result<(KernelState, EventJournal)> {
    tracing::info!("Starting recovery from event log: {:?}", log_path.as_ref());
    let started = Instant::now();

    let events = read_event_log(&log_path)?;
    let total = events.len() as u64;

    let base = match snapshot {
        Some(s) if s.version() <= total => {
            tracing::info!("Snapshot covers {} of {} events", s.version(), total);
            s
        }
        Some(s) => {
            tracing::warn!(
                "Snapshot version {} is ahead of event log ({} events). Discarding snapshot.",
                s.version(),
                total
            );
            KernelState::new()
        }
        None => KernelState::new(),
    };

    let skip = base.version() as usize;
    let state = replay_events(base, &events, skip)?;

    metrics::histogram!("ultranode_replay_duration_seconds", started.elapsed().as_secs_f64());
    tracing::info!("Recovered {} events (replayed {})", total, total - skip as u64);

    Ok((state, EventJournal::from_committed(events)))
}
