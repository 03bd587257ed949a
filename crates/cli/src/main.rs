use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ultranode_cli::commands::{generate, inspect, state, verify};
use ultranode_cli::hexutil::parse_kind;

#[derive(Parser)]
#[command(name = "merkle-sim")]
#[command(about = "Simulate Merkle proofs and inspect UltraNode data files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a Merkle root and the proof path for one entry
    Generate {
        /// Data entries (comma-separated)
        #[arg(short, long)]
        data: String,

        /// Index of the leaf to prove
        #[arg(short, long)]
        index: u32,

        /// Hash function: sha256 or blake3
        #[arg(long, default_value = "sha256")]
        hash: String,
    },
    /// Verify a proof path against a root
    Verify {
        /// Leaf hash (hex)
        #[arg(short, long)]
        leaf: String,

        /// Merkle root (hex)
        #[arg(short, long)]
        root: String,

        /// Proof path (comma-separated hex hashes)
        #[arg(short, long, default_value = "")]
        path: String,

        /// Index of the leaf
        #[arg(short, long)]
        index: u32,

        #[arg(long, default_value = "sha256")]
        hash: String,
    },
    /// Show snapshot and event log status.
    /// With --dir, looks for state.snapshot and events.log inside it.
    Inspect {
        #[arg(long, short)]
        dir: Option<PathBuf>,

        #[arg(long)]
        snapshot_path: Option<String>,

        #[arg(long)]
        event_log_path: Option<String>,

        /// List every event in the log
        #[arg(long)]
        events: bool,
    },
    /// Rebuild state from the event log and print roots and nodes
    State {
        event_log_path: PathBuf,

        /// Start from this snapshot instead of an empty state
        #[arg(long)]
        snapshot_path: Option<PathBuf>,

        /// Stop after this many events
        #[arg(long, short)]
        at: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { data, index, hash } => generate::run(parse_kind(&hash)?, &data, index),
        Commands::Verify {
            leaf,
            root,
            path,
            index,
            hash,
        } => {
            if !verify::run(parse_kind(&hash)?, &leaf, &root, &path, index)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Inspect {
            dir,
            snapshot_path,
            event_log_path,
            events,
        } => inspect::run(dir, snapshot_path, event_log_path, events),
        Commands::State {
            event_log_path,
            snapshot_path,
            at,
        } => state::run(snapshot_path.as_deref(), &event_log_path, at),
    }
}
