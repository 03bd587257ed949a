use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    /// Append-only event log. Without it the node runs in memory only.
    pub event_log_path: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
    pub auto_snapshot_interval_secs: Option<u64>,
    /// Bearer token required on every route when set.
    pub auth_token: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            event_log_path: None,
            snapshot_path: None,
            auto_snapshot_interval_secs: None,
            auth_token: None,
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by `ULTRANODE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = lookup("ULTRANODE_BIND") {
            cfg.bind_addr = raw
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "ULTRANODE_BIND", value: raw.clone() })?;
        }
        if let Some(raw) = lookup("ULTRANODE_EVENT_LOG") {
            cfg.event_log_path = Some(PathBuf::from(raw));
        }
        if let Some(raw) = lookup("ULTRANODE_SNAPSHOT") {
            cfg.snapshot_path = Some(PathBuf::from(raw));
        }
        if let Some(raw) = lookup("ULTRANODE_SNAPSHOT_INTERVAL") {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                var: "ULTRANODE_SNAPSHOT_INTERVAL",
                value: raw.clone(),
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid { var: "ULTRANODE_SNAPSHOT_INTERVAL", value: raw });
            }
            cfg.auto_snapshot_interval_secs = Some(secs);
        }
        if let Some(raw) = lookup("ULTRANODE_AUTH_TOKEN") {
            if !raw.is_empty() {
                cfg.auth_token = Some(raw);
            }
        }

        Ok(cfg)
    }
}
