// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Accepted root registry.

use alloc::collections::BTreeMap;

use crate::error::{KernelError, Result};
use crate::state::address::accepted_address;
use crate::types::account::{AcceptedRoot, ProgramConfig};
use crate::types::enums::PublishPolicy;
use crate::types::id::{Address, Hash32, Identity};

/// Content-addressed store of published roots. Entries are never updated or
/// removed once written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootRegistry {
    pub(crate) roots: BTreeMap<Address, AcceptedRoot>,
}

impl RootRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(
        &mut self,
        config: &ProgramConfig,
        root: Hash32,
        slot: u64,
        authority: Identity,
        signer: Identity,
    ) -> Result<AcceptedRoot> {
        if authority != signer {
            return Err(KernelError::Unauthorized);
        }
        if config.publish_policy == PublishPolicy::AdminOnly && authority != config.admin {
            return Err(KernelError::Unauthorized);
        }

        let addr = accepted_address(&root);
        if self.roots.contains_key(&addr) {
            return Err(KernelError::DuplicateRoot);
        }

        let entry = AcceptedRoot { root, slot, authority };
        self.roots.insert(addr, entry);
        Ok(entry)
    }

    pub fn get(&self, root: &Hash32) -> Option<&AcceptedRoot> {
        self.roots.get(&accepted_address(root))
    }

    pub fn contains(&self, root: &Hash32) -> bool {
        self.roots.contains_key(&accepted_address(root))
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Entries in address order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &AcceptedRoot)> {
        self.roots.iter()
    }

    /// Restore path used by snapshot decoding. Rejects duplicates.
    pub(crate) fn restore(&mut self, entry: AcceptedRoot) -> Result<()> {
        let addr = accepted_address(&entry.root);
        if self.roots.insert(addr, entry).is_some() {
            return Err(KernelError::InvalidInput);
        }
        Ok(())
    }
}
