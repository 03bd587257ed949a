use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use std::path::{Path, PathBuf};
use ultranode_kernel::event::KernelEvent;
use ultranode_kernel::state::command::Command;
use ultranode_node::events::read_event_log;
use ultranode_node::persistence::SnapshotManager;

pub const SNAPSHOT_FILE: &str = "state.snapshot";
pub const EVENT_LOG_FILE: &str = "events.log";

/// Snapshot and event log paths, from `dir` or explicit overrides.
pub fn resolve_paths(
    dir: Option<&Path>,
    snapshot_path: Option<String>,
    event_log_path: Option<String>,
) -> (PathBuf, PathBuf) {
    let base = dir.map(Path::to_path_buf).unwrap_or_default();
    (
        snapshot_path.map(PathBuf::from).unwrap_or_else(|| base.join(SNAPSHOT_FILE)),
        event_log_path.map(PathBuf::from).unwrap_or_else(|| base.join(EVENT_LOG_FILE)),
    )
}

fn short(bytes: &[u8]) -> String {
    let full = hex::encode(bytes);
    format!("{}…", &full[..12])
}

fn describe(event: &KernelEvent) -> String {
    match &event.command {
        Command::Initialize { admin, params } => format!(
            "admin {} hash {} policy {} depth {}",
            short(&admin.0),
            params.hash.name(),
            params.publish_policy.name(),
            params.max_proof_depth
        ),
        Command::PublishRoot { root, slot, authority } => {
            format!("root {} slot {} by {}", short(root), slot, short(&authority.0))
        }
        Command::SubmitVerifiedProof { tx_hash, root, index, siblings, submitter } => format!(
            "tx {} @{} under {} ({} siblings) for {}",
            short(tx_hash),
            index,
            short(root),
            siblings.len(),
            short(&submitter.0)
        ),
        Command::RecordUptime { owner } | Command::ClaimRewards { owner } => {
            format!("owner {}", short(&owner.0))
        }
    }
}

pub fn run(
    dir: Option<PathBuf>,
    snapshot_path: Option<String>,
    event_log_path: Option<String>,
    show_events: bool,
) -> anyhow::Result<()> {
    let (s_path, l_path) = resolve_paths(dir.as_deref(), snapshot_path, event_log_path);

    println!("\nUltraNode Status Report");
    println!("-----------------------");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["File", "Status", "Details"]);

    if s_path.exists() {
        match std::fs::read(&s_path).map_err(anyhow::Error::from).and_then(|buf| {
            SnapshotManager::parse(&buf).map_err(anyhow::Error::from)
        }) {
            Ok((meta, kernel)) => {
                let msg = format!(
                    "Schema: {}, State version: {}, Kernel bytes: {}, Saved: {}",
                    meta.version,
                    meta.state_version,
                    kernel.len(),
                    chrono::DateTime::from_timestamp(meta.timestamp as i64, 0)
                        .unwrap_or_default()
                        .to_rfc3339()
                );
                table.add_row(vec!["Snapshot", "FOUND", &msg]);
            }
            Err(e) => {
                table.add_row(vec!["Snapshot", "CORRUPT", &e.to_string()]);
            }
        }
    } else {
        table.add_row(vec!["Snapshot", "MISSING", ""]);
    }

    let mut events = Vec::new();
    if l_path.exists() {
        match read_event_log(&l_path) {
            Ok(list) => {
                table.add_row(vec!["Event log", "FOUND", &format!("{} events", list.len())]);
                events = list;
            }
            Err(e) => {
                table.add_row(vec!["Event log", "CORRUPT", &e.to_string()]);
            }
        }
    } else {
        table.add_row(vec!["Event log", "MISSING", ""]);
    }

    println!("{table}\n");

    if show_events && !events.is_empty() {
        let mut timeline = Table::new();
        timeline
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["#", "Type", "Signer", "Details"]);
        for (i, event) in events.iter().enumerate() {
            timeline.add_row(vec![
                (i + 1).to_string(),
                event.event_type().to_string(),
                short(&event.signer.0),
                describe(event),
            ]);
        }
        println!("{timeline}\n");
    }

    Ok(())
}
