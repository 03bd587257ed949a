// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Event journal.
//!
//! Keeps committed events (canonical) apart from the buffer (shadow
//! execution, not yet durable). Only `commit_buffer` promotes events; a crash
//! while buffered discards the buffer and replays the committed log.

use ultranode_kernel::event::KernelEvent;

#[derive(Clone, Debug, Default)]
pub struct EventJournal {
    committed: Vec<KernelEvent>,
    buffer: Vec<KernelEvent>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal rebuilt from a recovered log.
    pub fn from_committed(events: Vec<KernelEvent>) -> Self {
        Self {
            committed: events,
            buffer: Vec::new(),
        }
    }

    pub fn append_buffered(&mut self, event: KernelEvent) {
        self.buffer.push(event);
    }

    /// Call only once the buffered events are durable and shadow-applied.
    pub fn commit_buffer(&mut self) {
        self.committed.append(&mut self.buffer);
    }

    pub fn rollback_buffer(&mut self) {
        self.buffer.clear();
    }

    pub fn committed(&self) -> &[KernelEvent] {
        &self.committed
    }

    pub fn committed_height(&self) -> u64 {
        self.committed.len() as u64
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn has_pending_buffer(&self) -> bool {
        !self.buffer.is_empty()
    }
}
