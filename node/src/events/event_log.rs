// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Append-only event log writer.
//!
//! Events reach disk before they reach memory. Every append is flushed and
//! fsync'd before it returns.
//!
//! # File Format
//! ```text
//! [Header: 16 bytes][Event][Event][Event]...
//! ```
//!
//! Header: version u32 (1), digest_len u32 (32), reserved u64 (0).
//! Events are bincode (`config::standard`) encoded `KernelEvent`s.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use bincode::error::DecodeError;
use thiserror::Error;
use ultranode_kernel::event::KernelEvent;
use ultranode_kernel::replay::EventLogHeader;

#[derive(Error, Debug)]
pub enum EventLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid header")]
    InvalidHeader,

    #[error("Event log corrupted at offset {offset}")]
    Corrupted { offset: usize },
}

pub type Result<T> = std::result::Result<T, EventLogError>;

/// Decoded contents of an event log body (bytes after the header).
#[derive(Debug)]
pub struct ScannedLog {
    pub events: Vec<KernelEvent>,
    /// Length of the decodable prefix of the body.
    pub valid_len: usize,
}

/// Decode every complete event in `body`.
///
/// A body that ends mid-event (a crash during append) is accepted and the
/// partial tail is left out of `valid_len`. Any other decode failure is
/// corruption and fails closed.
pub fn scan_events(body: &[u8]) -> Result<ScannedLog> {
    let mut events = Vec::new();
    let mut offset = 0;

    while offset < body.len() {
        match bincode::serde::decode_from_slice::<KernelEvent, _>(
            &body[offset..],
            bincode::config::standard(),
        ) {
            Ok((event, read)) => {
                events.push(event);
                offset += read;
            }
            Err(DecodeError::UnexpectedEnd { .. }) => {
                tracing::warn!(
                    "Ignoring incomplete event at end of log (offset {}, {} bytes)",
                    offset,
                    body.len() - offset
                );
                break;
            }
            Err(_) => {
                return Err(EventLogError::Corrupted { offset: EventLogHeader::SIZE + offset });
            }
        }
    }

    Ok(ScannedLog { events, valid_len: offset })
}

pub(crate) fn parse_header(bytes: &[u8]) -> Result<&[u8]> {
    EventLogHeader::read(bytes)
        .map(|(_, rest)| rest)
        .map_err(|_| EventLogError::InvalidHeader)
}

pub struct EventLogWriter {
    path: PathBuf,
    file: BufWriter<File>,
    event_count: u64,
}

impl EventLogWriter {
    /// Open or create an event log file.
    ///
    /// An existing file has its header validated and its events counted. A
    /// torn tail left by a crash is cut off so new events follow the last
    /// complete one.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&path)?;

        let mut existing = Vec::new();
        file.read_to_end(&mut existing)?;

        let event_count = if existing.is_empty() {
            file.write_all(&EventLogHeader::default().to_bytes())?;
            file.sync_all()?;
            0
        } else {
            let body = parse_header(&existing)?;
            let scanned = scan_events(body)?;
            let valid_total = (EventLogHeader::SIZE + scanned.valid_len) as u64;
            if valid_total < existing.len() as u64 {
                tracing::warn!(
                    "Truncating torn tail of {:?} from {} to {} bytes",
                    path,
                    existing.len(),
                    valid_total
                );
                file.set_len(valid_total)?;
                file.sync_all()?;
            }
            scanned.events.len() as u64
        };

        Ok(Self {
            path,
            file: BufWriter::new(file),
            event_count,
        })
    }

    /// Append an event. Returns only after the bytes are durable.
    pub fn append(&mut self, event: &KernelEvent) -> Result<()> {
        let event_bytes = bincode::serde::encode_to_vec(event, bincode::config::standard())
            .map_err(|e| EventLogError::Serialization(e.to_string()))?;

        self.file.write_all(&event_bytes)?;
        self.file.flush()?;
        self.file.get_ref().sync_all()?;

        self.event_count += 1;
        Ok(())
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
