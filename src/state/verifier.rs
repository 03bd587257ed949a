// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Merkle proof admission against the root registry.

use crate::error::{KernelError, Result};
use crate::merkle::path::{compute_root, index_in_range};
use crate::state::nodes::NodeStore;
use crate::state::registry::RootRegistry;
use crate::types::account::{NodeRecord, ProgramConfig, ProofReceipt};
use crate::types::id::{Hash32, Identity};

/// A proof submission as presented by the caller.
#[derive(Clone, Copy, Debug)]
pub struct ProofSubmission<'a> {
    pub tx_hash: Hash32,
    pub root: Hash32,
    pub index: u32,
    pub siblings: &'a [Hash32],
    pub submitter: Identity,
}

pub struct ProofVerifier;

impl ProofVerifier {
    /// Checks run in order: identity, depth, root presence, index range,
    /// path, receipt.
    /// The node store is only touched once all of them pass.
    pub fn verify(
        config: &ProgramConfig,
        registry: &RootRegistry,
        nodes: &mut NodeStore,
        proof: ProofSubmission<'_>,
        signer: Identity,
    ) -> Result<NodeRecord> {
        if proof.submitter != signer {
            return Err(KernelError::Unauthorized);
        }
        if proof.siblings.len() > config.max_proof_depth as usize {
            return Err(KernelError::ProofTooDeep);
        }
        if !registry.contains(&proof.root) {
            return Err(KernelError::UnknownRoot);
        }

        // Bits above the path depth would name a leaf the path cannot reach.
        if !index_in_range(proof.index, proof.siblings.len()) {
            return Err(KernelError::InvalidProof);
        }

        let computed = compute_root(config.hash, &proof.tx_hash, proof.index, proof.siblings);
        if computed != proof.root {
            return Err(KernelError::InvalidProof);
        }

        if nodes.has_receipt(&proof.submitter, &proof.tx_hash) {
            return Err(KernelError::ReplayedProof);
        }

        let mut record = nodes.get_or_new(&proof.submitter);

        record.tx_hash = proof.tx_hash;
        record.index = proof.index;
        record.root = proof.root;
        record.tx_count = record.tx_count.checked_add(1).ok_or(KernelError::Overflow)?;

        nodes.put(record);
        nodes.put_receipt(ProofReceipt { owner: proof.submitter, tx_hash: proof.tx_hash });
        Ok(record)
    }
}
