use anyhow::{bail, Context};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use std::path::Path;
use ultranode_kernel::snapshot::decode_state;
use ultranode_kernel::state::kernel::KernelState;
use ultranode_kernel::state::nodes::pending_reward;
use ultranode_kernel::verify::kernel_state_hash;
use ultranode_node::events::event_replay::replay_events;
use ultranode_node::events::read_event_log;
use ultranode_node::persistence::SnapshotManager;

/// Rebuild state from an optional snapshot plus the event log, stopping
/// after `at` events (all of them when `None`).
pub fn rebuild(snapshot_path: Option<&Path>, event_log_path: &Path, at: Option<u64>) -> anyhow::Result<KernelState> {
    let base = match snapshot_path.filter(|p| p.exists()) {
        Some(p) => {
            let buf = std::fs::read(p).with_context(|| format!("reading {}", p.display()))?;
            let (_, kernel) = SnapshotManager::parse(&buf)?;
            decode_state(&kernel).context("Failed to decode snapshot kernel")?
        }
        None => KernelState::new(),
    };

    let events = read_event_log(event_log_path)?;
    let total = events.len() as u64;
    let target = at.unwrap_or(total);

    if target > total {
        bail!("event log holds {} events, cannot stop at {}", total, target);
    }
    if target < base.version() {
        bail!(
            "snapshot already covers {} events; rebuild without it to stop at {}",
            base.version(),
            target
        );
    }

    let skip = base.version() as usize;
    Ok(replay_events(base, &events[..target as usize], skip)?)
}

pub fn run(snapshot_path: Option<&Path>, event_log_path: &Path, at: Option<u64>) -> anyhow::Result<()> {
    let state = rebuild(snapshot_path, event_log_path, at)?;

    println!("\nState at version {}", state.version());
    println!("State hash: {}", hex::encode(kernel_state_hash(&state)));
    match state.config() {
        Some(cfg) => println!(
            "Config: admin {}, hash {}, policy {}, max depth {}\n",
            hex::encode(cfg.admin.0),
            cfg.hash.name(),
            cfg.publish_policy.name(),
            cfg.max_proof_depth
        ),
        None => println!("Config: not initialized\n"),
    }

    let mut roots = Table::new();
    roots
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Root", "Slot", "Authority"]);
    for (_, entry) in state.registry().iter() {
        roots.add_row(vec![
            hex::encode(entry.root),
            entry.slot.to_string(),
            hex::encode(entry.authority.0),
        ]);
    }
    println!("{roots}\n");

    let mut nodes = Table::new();
    nodes
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Owner", "Last tx", "Txs", "Uptime", "Claimed", "Pending"]);
    for (_, record) in state.nodes().iter() {
        let pending = pending_reward(record)
            .map(|r| r.to_string())
            .unwrap_or_else(|_| "overflow".into());
        nodes.add_row(vec![
            hex::encode(record.owner.0),
            hex::encode(record.tx_hash),
            record.tx_count.to_string(),
            record.uptime.to_string(),
            record.rewards_claimed.to_string(),
            pending,
        ]);
    }
    println!("{nodes}\n");

    Ok(())
}
