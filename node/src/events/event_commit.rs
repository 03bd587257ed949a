// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Event commit barrier.
//!
//! ```text
//! event
//!   ↓ 1. shadow apply on a clone of live state
//!   ↓ 2. buffer in journal
//!   ↓ 3. append to event log (fsync)
//!   ↓ 4. commit boundary
//!   ↓ 5. shadow becomes live
//! ```
//!
//! A rejected command fails at step 1 and never reaches the log, so the log
//! holds exactly the applied events and `live_state.version()` equals the
//! committed height. A write failure at step 3 rolls back the buffer and
//! leaves live state unchanged.

use std::time::Instant;

use thiserror::Error;
use ultranode_kernel::error::KernelError;
use ultranode_kernel::event::KernelEvent;
use ultranode_kernel::state::kernel::{KernelState, Outcome};

use crate::events::event_journal::EventJournal;
use crate::events::event_log::{EventLogError, EventLogWriter};

#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Event log error: {0}")]
    EventLog(#[from] EventLogError),

    #[error("Rejected by kernel: {0}")]
    Rejected(KernelError),
}

pub type Result<T> = std::result::Result<T, CommitError>;

pub struct EventCommitter {
    /// `None` runs the node in memory only.
    event_log: Option<EventLogWriter>,
    journal: EventJournal,
    live_state: KernelState,
}

impl EventCommitter {
    pub fn new(event_log: Option<EventLogWriter>, journal: EventJournal, live_state: KernelState) -> Self {
        Self {
            event_log,
            journal,
            live_state,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(None, EventJournal::new(), KernelState::new())
    }

    /// Commit one event. This is the only mutation path for live state.
    pub fn commit_event(&mut self, event: KernelEvent) -> Result<Outcome> {
        let started = Instant::now();

        let mut shadow = self.live_state.clone();
        let outcome = shadow.apply_event(&event).map_err(|e| {
            tracing::debug!("Shadow apply rejected {}: {}", event.event_type(), e);
            CommitError::Rejected(e)
        })?;

        self.journal.append_buffered(event.clone());

        if let Some(log) = self.event_log.as_mut() {
            if let Err(e) = log.append(&event) {
                tracing::error!("Event log append failed: {}. Rolling back buffer.", e);
                self.journal.rollback_buffer();
                return Err(e.into());
            }
        }

        self.journal.commit_buffer();
        self.live_state = shadow;

        metrics::increment_counter!("ultranode_events_committed_total");
        metrics::histogram!(
            "ultranode_event_commit_duration_seconds",
            started.elapsed().as_secs_f64()
        );
        tracing::debug!(
            "Event committed: {} (height {})",
            event.event_type(),
            self.journal.committed_height()
        );

        Ok(outcome)
    }

    pub fn live_state(&self) -> &KernelState {
        &self.live_state
    }

    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    pub fn event_log(&self) -> Option<&EventLogWriter> {
        self.event_log.as_ref()
    }

    /// Replace live state wholesale. Only valid without an event log, where
    /// a snapshot is the sole source of state.
    pub(crate) fn reset_state(&mut self, state: KernelState) {
        self.live_state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use ultranode_kernel::state::command::Command;
    use ultranode_kernel::types::account::InitParams;
    use ultranode_kernel::types::id::Identity;

    const ADMIN: Identity = Identity([0xAA; 32]);

    fn init() -> KernelEvent {
        KernelEvent::new(ADMIN, Command::Initialize { admin: ADMIN, params: InitParams::default() })
    }

    #[test]
    fn test_commit_writes_log_and_state() {
        let dir = tempdir().unwrap();
        let log = EventLogWriter::open(dir.path().join("events.log")).unwrap();
        let mut committer = EventCommitter::new(Some(log), EventJournal::new(), KernelState::new());

        let outcome = committer.commit_event(init()).unwrap();
        assert!(matches!(outcome, Outcome::Initialized(_)));
        assert_eq!(committer.live_state().version(), 1);
        assert_eq!(committer.journal().committed_height(), 1);
        assert_eq!(committer.event_log().unwrap().event_count(), 1);
    }

    #[test]
    fn test_rejected_event_not_logged() {
        let dir = tempdir().unwrap();
        let log = EventLogWriter::open(dir.path().join("events.log")).unwrap();
        let mut committer = EventCommitter::new(Some(log), EventJournal::new(), KernelState::new());

        committer.commit_event(init()).unwrap();
        let err = committer.commit_event(init()).unwrap_err();

        assert!(matches!(err, CommitError::Rejected(KernelError::AlreadyInitialized)));
        assert_eq!(committer.live_state().version(), 1);
        assert_eq!(committer.journal().committed_height(), 1);
        assert!(!committer.journal().has_pending_buffer());
        assert_eq!(committer.event_log().unwrap().event_count(), 1);
    }

    #[test]
    fn test_in_memory_mode() {
        let mut committer = EventCommitter::in_memory();
        committer.commit_event(init()).unwrap();
        assert!(committer.event_log().is_none());
        assert_eq!(committer.journal().committed_height(), 1);
    }
}
