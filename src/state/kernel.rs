// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Kernel state definition.

use crate::error::{KernelError, Result};
use crate::event::KernelEvent;
use crate::state::command::Command;
use crate::state::nodes::NodeStore;
use crate::state::registry::RootRegistry;
use crate::state::verifier::{ProofSubmission, ProofVerifier};
use crate::types::account::{AcceptedRoot, NodeRecord, ProgramConfig};
use crate::types::id::{Hash32, Identity, Version};

/// What a successfully applied command produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Initialized(ProgramConfig),
    RootPublished(AcceptedRoot),
    ProofAccepted(NodeRecord),
    UptimeRecorded(NodeRecord),
    RewardsClaimed(u64),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KernelState {
    pub(crate) version: Version,
    pub(crate) config: Option<ProgramConfig>,
    pub(crate) registry: RootRegistry,
    pub(crate) nodes: NodeStore,
}

impl KernelState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Read APIs ---

    pub fn version(&self) -> u64 {
        self.version.0
    }

    pub fn config(&self) -> Option<&ProgramConfig> {
        self.config.as_ref()
    }

    pub fn registry(&self) -> &RootRegistry {
        &self.registry
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn get_root(&self, root: &Hash32) -> Option<&AcceptedRoot> {
        self.registry.get(root)
    }

    pub fn get_node(&self, owner: &Identity) -> Option<&NodeRecord> {
        self.nodes.get(owner)
    }

    // --- Write Logic ---

    pub fn apply_event(&mut self, event: &KernelEvent) -> Result<Outcome> {
        self.apply(event.signer, &event.command)
    }

    /// Apply one command on behalf of `signer`. On error the state is left
    /// untouched and the version does not move.
    pub fn apply(&mut self, signer: Identity, cmd: &Command) -> Result<Outcome> {
        let outcome = match cmd {
            Command::Initialize { admin, params } => {
                if self.config.is_some() {
                    return Err(KernelError::AlreadyInitialized);
                }
                if *admin != signer {
                    return Err(KernelError::Unauthorized);
                }
                let config = ProgramConfig::initialize(*admin, *params)?;
                self.config = Some(config);
                Outcome::Initialized(config)
            }
            Command::PublishRoot { root, slot, authority } => {
                let config = self.config.ok_or(KernelError::NotInitialized)?;
                let entry = self.registry.publish(&config, *root, *slot, *authority, signer)?;
                Outcome::RootPublished(entry)
            }
            Command::SubmitVerifiedProof { tx_hash, root, index, siblings, submitter } => {
                let config = self.config.ok_or(KernelError::NotInitialized)?;
                let submission = ProofSubmission {
                    tx_hash: *tx_hash,
                    root: *root,
                    index: *index,
                    siblings,
                    submitter: *submitter,
                };
                let record = ProofVerifier::verify(&config, &self.registry, &mut self.nodes, submission, signer)?;
                Outcome::ProofAccepted(record)
            }
            Command::RecordUptime { owner } => {
                self.config.ok_or(KernelError::NotInitialized)?;
                Outcome::UptimeRecorded(self.nodes.record_uptime(*owner, signer)?)
            }
            Command::ClaimRewards { owner } => {
                self.config.ok_or(KernelError::NotInitialized)?;
                Outcome::RewardsClaimed(self.nodes.claim_rewards(*owner, signer)?)
            }
        };

        self.version = self.version.next();
        Ok(outcome)
    }
}
