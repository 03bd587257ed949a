// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Proofs over the event log.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ultranode_kernel::config::KERNEL_VERSION;
use ultranode_kernel::proof::DeterministicProof;
use ultranode_kernel::state::kernel::KernelState;
use ultranode_kernel::verify::kernel_state_hash;

/// BLAKE3 over the whole log file, header included. Streams the file.
pub fn compute_event_log_hash(path: impl AsRef<Path>) -> std::io::Result<[u8; 32]> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = blake3::Hasher::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(*hasher.finalize().as_bytes())
}

pub fn build_proof(
    state: &KernelState,
    snapshot_hash: Option<[u8; 32]>,
    event_log_hash: Option<[u8; 32]>,
    event_count: u64,
) -> DeterministicProof {
    metrics::increment_counter!("ultranode_proofs_generated_total");
    DeterministicProof {
        kernel_version: KERNEL_VERSION,
        snapshot_hash: snapshot_hash.unwrap_or([0u8; 32]),
        event_log_hash: event_log_hash.unwrap_or([0u8; 32]),
        final_state_hash: kernel_state_hash(state),
        event_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_hash_matches_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.log");
        let data = vec![7u8; 200_000];
        std::fs::write(&path, &data).unwrap();

        assert_eq!(compute_event_log_hash(&path).unwrap(), *blake3::hash(&data).as_bytes());
    }

    #[test]
    fn test_empty_state_proof() {
        let proof = build_proof(&KernelState::new(), None, None, 0);
        assert_eq!(proof.kernel_version, KERNEL_VERSION);
        assert_eq!(proof.snapshot_hash, [0u8; 32]);
        assert_eq!(proof.final_state_hash, kernel_state_hash(&KernelState::new()));
    }
}
