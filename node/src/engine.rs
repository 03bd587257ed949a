// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::{Path, PathBuf};

use ultranode_kernel::error::KernelError;
use ultranode_kernel::event::KernelEvent;
use ultranode_kernel::proof::DeterministicProof;
use ultranode_kernel::snapshot::{decode_state, encode_state};
use ultranode_kernel::state::command::Command;
use ultranode_kernel::state::kernel::{KernelState, Outcome};
use ultranode_kernel::types::account::{AcceptedRoot, InitParams, NodeRecord, ProgramConfig};
use ultranode_kernel::types::id::{Hash32, Identity};
use ultranode_kernel::verify::snapshot_hash;

use crate::config::NodeConfig;
use crate::errors::EngineError;
use crate::events::{
    build_proof, compute_event_log_hash, recover_from_event_log, EventCommitter, EventLogWriter,
};
use crate::persistence::{SnapshotManager, SnapshotMeta};

pub struct Engine {
    committer: EventCommitter,
    pub snapshot_path: Option<PathBuf>,
    /// BLAKE3 of the kernel bytes in the last saved or loaded snapshot.
    pub current_snapshot_hash: Option<[u8; 32]>,
}

impl Engine {
    /// Engine with no event log and no snapshot.
    pub fn in_memory() -> Self {
        Self {
            committer: EventCommitter::in_memory(),
            snapshot_path: None,
            current_snapshot_hash: None,
        }
    }

    /// Build the engine from config, recovering state from the snapshot and
    /// event log when they exist.
    pub fn open(cfg: &NodeConfig) -> Result<Self, EngineError> {
        let mut snapshot_state = None;
        let mut current_snapshot_hash = None;

        if let Some(path) = cfg.snapshot_path.as_ref().filter(|p| p.exists()) {
            tracing::info!("Found snapshot at {:?}. Loading...", path);
            let (meta, kernel) = SnapshotManager::parse(&std::fs::read(path)?)?;
            let state = decode_state(&kernel)?;
            if state.version() != meta.state_version {
                return Err(EngineError::InvalidInput(format!(
                    "snapshot metadata version {} does not match kernel version {}",
                    meta.state_version,
                    state.version()
                )));
            }
            current_snapshot_hash = Some(snapshot_hash(&kernel));
            snapshot_state = Some(state);
        }

        let committer = match &cfg.event_log_path {
            Some(log_path) => {
                let (state, journal) = recover_from_event_log(log_path, snapshot_state)?;
                let writer = EventLogWriter::open(log_path)?;
                tracing::info!(
                    "Event log initialized at {:?} ({} events)",
                    log_path,
                    writer.event_count()
                );
                EventCommitter::new(Some(writer), journal, state)
            }
            None => {
                tracing::warn!("No event log configured. State lives in memory only.");
                let mut committer = EventCommitter::in_memory();
                if let Some(state) = snapshot_state {
                    committer.reset_state(state);
                }
                committer
            }
        };

        Ok(Self {
            committer,
            snapshot_path: cfg.snapshot_path.clone(),
            current_snapshot_hash,
        })
    }

    fn commit(&mut self, signer: Identity, command: Command) -> Result<Outcome, EngineError> {
        Ok(self.committer.commit_event(KernelEvent::new(signer, command))?)
    }

    // --- Program operations ---

    pub fn initialize(
        &mut self,
        signer: Identity,
        admin: Identity,
        params: InitParams,
    ) -> Result<ProgramConfig, EngineError> {
        match self.commit(signer, Command::Initialize { admin, params })? {
            Outcome::Initialized(cfg) => {
                tracing::info!("Program initialized (hash {}, policy {})", cfg.hash.name(), cfg.publish_policy.name());
                Ok(cfg)
            }
            _ => Err(EngineError::Internal),
        }
    }

    pub fn publish_root(
        &mut self,
        signer: Identity,
        root: Hash32,
        slot: u64,
        authority: Identity,
    ) -> Result<AcceptedRoot, EngineError> {
        match self.commit(signer, Command::PublishRoot { root, slot, authority })? {
            Outcome::RootPublished(entry) => {
                metrics::increment_counter!("ultranode_roots_published_total");
                Ok(entry)
            }
            _ => Err(EngineError::Internal),
        }
    }

    pub fn submit_proof(
        &mut self,
        signer: Identity,
        tx_hash: Hash32,
        root: Hash32,
        index: u32,
        siblings: Vec<Hash32>,
        submitter: Identity,
    ) -> Result<NodeRecord, EngineError> {
        let cmd = Command::SubmitVerifiedProof { tx_hash, root, index, siblings, submitter };
        match self.commit(signer, cmd) {
            Ok(Outcome::ProofAccepted(record)) => {
                metrics::increment_counter!("ultranode_proofs_accepted_total");
                Ok(record)
            }
            Ok(_) => Err(EngineError::Internal),
            Err(e) => {
                if let EngineError::Kernel(k) = &e {
                    metrics::increment_counter!("ultranode_proofs_rejected_total", "reason" => kernel_reason(k));
                }
                Err(e)
            }
        }
    }

    pub fn record_uptime(&mut self, signer: Identity, owner: Identity) -> Result<NodeRecord, EngineError> {
        match self.commit(signer, Command::RecordUptime { owner })? {
            Outcome::UptimeRecorded(record) => Ok(record),
            _ => Err(EngineError::Internal),
        }
    }

    pub fn claim_rewards(&mut self, signer: Identity, owner: Identity) -> Result<u64, EngineError> {
        match self.commit(signer, Command::ClaimRewards { owner })? {
            Outcome::RewardsClaimed(amount) => Ok(amount),
            _ => Err(EngineError::Internal),
        }
    }

    // --- Reads ---

    pub fn state(&self) -> &KernelState {
        self.committer.live_state()
    }

    pub fn config(&self) -> Option<&ProgramConfig> {
        self.state().config()
    }

    pub fn get_root(&self, root: &Hash32) -> Option<&AcceptedRoot> {
        self.state().get_root(root)
    }

    pub fn get_node(&self, owner: &Identity) -> Option<&NodeRecord> {
        self.state().get_node(owner)
    }

    pub fn event_log_path(&self) -> Option<&Path> {
        self.committer.event_log().map(|l| l.path())
    }

    /// Events folded into the live state. Without an event log a loaded
    /// snapshot is the only history, so the state version is the count.
    pub fn event_count(&self) -> u64 {
        match self.committer.event_log() {
            Some(_) => self.committer.journal().committed_height(),
            None => self.state().version(),
        }
    }

    // --- Snapshots and proofs ---

    /// Snapshot container bytes for the current state.
    pub fn snapshot(&self) -> Result<Vec<u8>, EngineError> {
        let kernel = encode_state(self.state());
        let mut meta = SnapshotMeta::new(self.state().version());
        Ok(SnapshotManager::encode(&kernel, &mut meta)?)
    }

    /// Save a snapshot to `path`, or to the configured snapshot path.
    pub fn save_snapshot(&mut self, path: Option<&Path>) -> Result<PathBuf, EngineError> {
        let target = path
            .map(Path::to_path_buf)
            .or_else(|| self.snapshot_path.clone())
            .ok_or_else(|| EngineError::InvalidInput("no snapshot path configured".into()))?;

        let kernel = encode_state(self.state());
        let mut meta = SnapshotMeta::new(self.state().version());
        let size = SnapshotManager::save(&target, &kernel, &mut meta)?;

        self.current_snapshot_hash = Some(snapshot_hash(&kernel));
        metrics::gauge!("ultranode_snapshot_size_bytes", size as f64);
        tracing::info!("Snapshot saved to {:?} ({} bytes, version {})", target, size, meta.state_version);
        Ok(target)
    }

    pub fn get_proof(&self) -> Result<DeterministicProof, EngineError> {
        let event_log_hash = match self.event_log_path() {
            Some(path) => Some(compute_event_log_hash(path)?),
            None => None,
        };
        Ok(build_proof(
            self.state(),
            self.current_snapshot_hash,
            event_log_hash,
            self.event_count(),
        ))
    }
}

fn kernel_reason(e: &KernelError) -> &'static str {
    match e {
        KernelError::InvalidProof => "invalid_proof",
        KernelError::UnknownRoot => "unknown_root",
        KernelError::Unauthorized => "unauthorized",
        KernelError::ProofTooDeep => "too_deep",
        KernelError::ReplayedProof => "replayed",
        KernelError::NotInitialized => "not_initialized",
        _ => "other",
    }
}
