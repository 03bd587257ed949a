// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Event-sourced persistence.
//!
//! - Event log: primary truth, append-only, fsync'd
//! - Snapshots: disposable cache
//! - Journal: committed events plus the shadow buffer

pub mod event_log;
pub mod event_journal;
pub mod event_replay;
pub mod event_commit;
pub mod event_proof;

pub use event_commit::{CommitError, EventCommitter};
pub use event_journal::EventJournal;
pub use event_log::{EventLogError, EventLogWriter};
pub use event_proof::{build_proof, compute_event_log_hash};
pub use event_replay::{read_event_log, recover_from_event_log, ReplayError};
