// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use ultranode_node::config::NodeConfig;
use ultranode_node::engine::Engine;
use ultranode_node::server::{build_router, SharedEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ultranode_node::telemetry::init_telemetry().context("failed to install metrics recorder")?;

    let cfg = NodeConfig::from_env().context("invalid node configuration")?;
    tracing::info!(
        "Initializing UltraNode (bind {}, event log {:?}, snapshot {:?}, auth {})",
        cfg.bind_addr,
        cfg.event_log_path,
        cfg.snapshot_path,
        if cfg.auth_token.is_some() { "on" } else { "off" }
    );

    let engine = Engine::open(&cfg).context("failed to recover engine state")?;
    tracing::info!(
        "State recovered at version {} ({} logged events)",
        engine.state().version(),
        engine.event_count()
    );

    let shared_state: SharedEngine = Arc::new(Mutex::new(engine));

    if let (Some(path), Some(secs)) = (cfg.snapshot_path.clone(), cfg.auto_snapshot_interval_secs) {
        let state_clone = shared_state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(secs));
            // The first tick fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                tracing::debug!("Auto-snapshotting...");
                let mut engine = state_clone.lock().await;
                if let Err(e) = engine.save_snapshot(Some(&path)) {
                    tracing::error!("Snapshot failed: {}", e);
                }
            }
        });
    }

    let app = build_router(shared_state, cfg.auth_token.clone());

    let listener = TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;
    tracing::info!("Listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
