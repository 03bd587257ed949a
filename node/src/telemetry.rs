// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::OnceLock;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const DEFAULT_LOG_FILTER: &str = "ultranode_node=debug,tower_http=debug";

/// Install the log subscriber and the Prometheus recorder.
pub fn init_telemetry() -> Result<(), BuildError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let handle = PrometheusBuilder::new().install_recorder()?;
    if PROM_HANDLE.set(handle).is_err() {
        tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
    }

    metrics::describe_counter!("ultranode_roots_published_total", "Roots accepted into the registry");
    metrics::describe_counter!("ultranode_proofs_accepted_total", "Merkle proofs verified and recorded");
    metrics::describe_counter!("ultranode_proofs_rejected_total", "Merkle proofs rejected, by reason");
    metrics::describe_counter!("ultranode_events_committed_total", "Events committed to the log");
    metrics::describe_counter!("ultranode_proofs_generated_total", "State proofs generated");
    metrics::describe_histogram!("ultranode_event_commit_duration_seconds", "Time taken to commit an event");
    metrics::describe_histogram!("ultranode_replay_duration_seconds", "Time taken to replay the event log");
    metrics::describe_gauge!("ultranode_snapshot_size_bytes", "Size of the last saved snapshot in bytes");

    metrics::gauge!("ultranode_node_up", 1.0);
    Ok(())
}

/// Prometheus text exposition of all recorded metrics.
pub fn get_metrics() -> String {
    match PROM_HANDLE.get() {
        Some(handle) => handle.render(),
        None => "# metrics not initialized\n".to_string(),
    }
}
