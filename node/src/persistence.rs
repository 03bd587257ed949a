//! Snapshot container on disk.
//!
//! ```text
//! [MAGIC u32][VER u32][META_LEN u32][META_JSON][KERNEL][CRC32 u32]
//! ```
//!
//! `KERNEL` is the kernel's own snapshot encoding. The CRC covers everything
//! before it. Saves go through a `.tmp` file and a rename; the previous
//! snapshot is kept as `.prev`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAGIC: u32 = 0x554C_544E; // ULTN
const SCHEMA_VERSION: u32 = 1;
const HEADER_LEN: usize = 12;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot metadata error: {0}")]
    Meta(#[from] serde_json::Error),

    #[error("Snapshot corrupted: {0}")]
    Corrupt(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SnapshotMeta {
    pub version: u32,
    /// Seconds since the Unix epoch at save time. Not part of any hash.
    pub timestamp: u64,
    pub kernel_len: u64,
    /// Kernel state version, i.e. the number of events folded in.
    pub state_version: u64,
}

impl SnapshotMeta {
    pub fn new(state_version: u64) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            version: SCHEMA_VERSION,
            timestamp,
            kernel_len: 0,
            state_version,
        }
    }
}

pub struct SnapshotManager;

impl SnapshotManager {
    /// Build the container bytes.
    pub fn encode(kernel_data: &[u8], meta: &mut SnapshotMeta) -> Result<Vec<u8>, PersistenceError> {
        meta.kernel_len = kernel_data.len() as u64;
        let meta_json = serde_json::to_vec(meta)?;

        let mut out = Vec::with_capacity(HEADER_LEN + meta_json.len() + kernel_data.len() + 4);
        out.extend_from_slice(&MAGIC.to_le_bytes());
        out.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
        out.extend_from_slice(&(meta_json.len() as u32).to_le_bytes());
        out.extend_from_slice(&meta_json);
        out.extend_from_slice(kernel_data);

        let mut hasher = Hasher::new();
        hasher.update(&out);
        out.extend_from_slice(&hasher.finalize().to_le_bytes());
        Ok(out)
    }

    /// Write the container atomically. Returns its size in bytes.
    pub fn save(path: &Path, kernel_data: &[u8], meta: &mut SnapshotMeta) -> Result<u64, PersistenceError> {
        let bytes = Self::encode(kernel_data, meta)?;
        let tmp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }

        if path.exists() {
            let prev_path = path.with_extension("prev");
            if let Err(e) = std::fs::rename(path, &prev_path) {
                tracing::warn!("Could not keep previous snapshot at {:?}: {}", prev_path, e);
            }
        }

        std::fs::rename(&tmp_path, path)?;
        Ok(bytes.len() as u64)
    }

    /// Validate the container and return its metadata and kernel bytes.
    pub fn parse(buffer: &[u8]) -> Result<(SnapshotMeta, Vec<u8>), PersistenceError> {
        if buffer.len() < HEADER_LEN + 4 {
            return Err(PersistenceError::Corrupt("snapshot too short".into()));
        }

        let (content, trailer) = buffer.split_at(buffer.len() - 4);
        let stored_crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let mut hasher = Hasher::new();
        hasher.update(content);
        if hasher.finalize() != stored_crc {
            return Err(PersistenceError::Corrupt("checksum mismatch".into()));
        }

        let word = |i: usize| u32::from_le_bytes([content[i], content[i + 1], content[i + 2], content[i + 3]]);
        if word(0) != MAGIC {
            return Err(PersistenceError::Corrupt("invalid magic".into()));
        }
        if word(4) != SCHEMA_VERSION {
            return Err(PersistenceError::Corrupt("schema version mismatch".into()));
        }

        let meta_end = HEADER_LEN + word(8) as usize;
        if content.len() < meta_end {
            return Err(PersistenceError::Corrupt("truncated metadata".into()));
        }
        let meta: SnapshotMeta = serde_json::from_slice(&content[HEADER_LEN..meta_end])?;

        let kernel = &content[meta_end..];
        if kernel.len() as u64 != meta.kernel_len {
            return Err(PersistenceError::Corrupt(format!(
                "meta claims {} kernel bytes, found {}",
                meta.kernel_len,
                kernel.len()
            )));
        }

        Ok((meta, kernel.to_vec()))
    }
}
