use clap::Parser;
use std::path::PathBuf;
use std::fs;
use serde::{Deserialize, Serialize};
use anyhow::{Context, Result};
use ultranode_kernel::config::KERNEL_VERSION;
use ultranode_kernel::proof::DeterministicProof;
use ultranode_kernel::replay::replay_state;
use ultranode_kernel::verify::{event_log_hash, kernel_state_hash, snapshot_hash};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay an UltraNode event log offline and emit its state proof", long_about = None)]
struct Args {
    /// Path to the event log (e.g. events.log)
    event_log: PathBuf,

    /// Snapshot container to start from. Replay starts from empty state without it.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Fail unless the replayed state hash equals this hex value
    #[arg(long)]
    expect: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
struct SnapshotMeta {
    pub version: u32,
    pub timestamp: u64,
    pub kernel_len: u64,
    pub state_version: u64,
}

/// Proof with hashes rendered as hex, the same shape the node serves.
#[derive(Serialize, Debug)]
struct ProofOutput {
    kernel_version: u64,
    snapshot_hash: String,
    event_log_hash: String,
    final_state_hash: String,
    event_count: u64,
}

impl From<&DeterministicProof> for ProofOutput {
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

const MAGIC: u32 = 0x554C_544E; // ULTN
const HEADER_LEN: usize = 12;

/// Returns the container metadata and the kernel blob inside it.
fn parse_snapshot(buffer: &[u8]) -> Result<(SnapshotMeta, Vec<u8>)> {
    if buffer.len() < HEADER_LEN + 4 {
        anyhow::bail!("Snapshot too short");
    }

    let (content, trailer) = buffer.split_at(buffer.len() - 4);
    let stored_crc = u32::from_le_bytes(trailer.try_into()?);
    if crc32fast::hash(content) != stored_crc {
        anyhow::bail!("Snapshot checksum mismatch");
    }

    let magic = u32::from_le_bytes(content[0..4].try_into()?);
    if magic != MAGIC {
        anyhow::bail!("Invalid Magic Number");
    }

    let meta_len = u32::from_le_bytes(content[8..12].try_into()?) as usize;
    let meta_end = HEADER_LEN + meta_len;
    if content.len() < meta_end {
        anyhow::bail!("Truncated metadata");
    }

    let meta: SnapshotMeta = serde_json::from_slice(&content[HEADER_LEN..meta_end])
        .context("Failed to parse Snapshot Metadata JSON")?;

    let kernel_blob = &content[meta_end..];
    if kernel_blob.len() as u64 != meta.kernel_len {
        anyhow::bail!("Truncated kernel data");
    }

    Ok((meta, kernel_blob.to_vec()))
}

fn prove(snapshot: Option<&[u8]>, log_bytes: &[u8]) -> Result<DeterministicProof> {
    let kernel_blob = match snapshot {
        Some(buf) => {
            let (meta, blob) = parse_snapshot(buf).context("Failed to parse snapshot container")?;
            eprintln!("Snapshot covers {} events", meta.state_version);
            Some(blob)
        }
        None => None,
    };

    let (state, event_count) =
        replay_state(kernel_blob.as_deref().unwrap_or(&[]), log_bytes).context("Replay failed")?;

    Ok(DeterministicProof {
        kernel_version: KERNEL_VERSION,
        snapshot_hash: kernel_blob.as_deref().map(snapshot_hash).unwrap_or([0u8; 32]),
        event_log_hash: event_log_hash(log_bytes),
        final_state_hash: kernel_state_hash(&state),
        event_count,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    eprintln!("UltraNode Verifier v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("Kernel version: {}", KERNEL_VERSION);

    let snapshot = match &args.snapshot {
        Some(path) => Some(fs::read(path).context("Failed to read snapshot file")?),
        None => None,
    };
    let log_bytes = fs::read(&args.event_log).context("Failed to read event log")?;

    let proof = prove(snapshot.as_deref(), &log_bytes)?;

    let json = serde_json::to_string_pretty(&ProofOutput::from(&proof))?;
    println!("{}", json);

    if let Some(expected) = args.expect {
        let actual = hex::encode(proof.final_state_hash);
        if expected.trim().trim_start_matches("0x") != actual {
            anyhow::bail!("State hash mismatch: expected {}, replayed {}", expected, actual);
        }
        eprintln!("State hash matches");
    }

    Ok(())
}
