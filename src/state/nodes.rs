//! Per-owner node records and reward accounting.

use alloc::collections::BTreeMap;

use crate::config::{UPTIME_EPOCH, UPTIME_EPOCH_REWARD};
use crate::error::{KernelError, Result};
use crate::state::address::{node_address, receipt_address};
use crate::types::account::{NodeRecord, ProofReceipt};
use crate::types::id::{Address, Hash32, Identity};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeStore {
    pub(crate) records: BTreeMap<Address, NodeRecord>,
    pub(crate) receipts: BTreeMap<Address, ProofReceipt>,
}

/// Reward owed for the activity accumulated since the last claim.
pub fn pending_reward(record: &NodeRecord) -> Result<u64> {
    let epochs = (record.uptime / UPTIME_EPOCH) as u64;
    let uptime_reward = epochs
        .checked_mul(UPTIME_EPOCH_REWARD)
        .ok_or(KernelError::Overflow)?;
    (record.tx_count as u64)
        .checked_add(uptime_reward)
        .ok_or(KernelError::Overflow)
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, owner: &Identity) -> Option<&NodeRecord> {
        self.records.get(&node_address(owner))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &NodeRecord)> {
        self.records.iter()
    }

    pub fn has_receipt(&self, owner: &Identity, tx_hash: &Hash32) -> bool {
        self.receipts.contains_key(&receipt_address(owner, tx_hash))
    }

    pub fn receipt_count(&self) -> usize {
        self.receipts.len()
    }

    /// Receipts in address order.
    pub fn receipts(&self) -> impl Iterator<Item = (&Address, &ProofReceipt)> {
        self.receipts.iter()
    }

    pub(crate) fn put_receipt(&mut self, receipt: ProofReceipt) {
        self.receipts
            .insert(receipt_address(&receipt.owner, &receipt.tx_hash), receipt);
    }

    /// Existing record for `owner`, or a fresh zeroed one.
    pub(crate) fn get_or_new(&self, owner: &Identity) -> NodeRecord {
        self.get(owner).copied().unwrap_or_else(|| NodeRecord::new(*owner))
    }

    pub(crate) fn put(&mut self, record: NodeRecord) {
        self.records.insert(node_address(&record.owner), record);
    }

    pub fn record_uptime(&mut self, owner: Identity, signer: Identity) -> Result<NodeRecord> {
        if owner != signer {
            return Err(KernelError::Unauthorized);
        }
        let addr = node_address(&owner);
        let record = self.records.get_mut(&addr).ok_or(KernelError::NodeNotFound)?;
        record.uptime = record.uptime.checked_add(1).ok_or(KernelError::Overflow)?;
        Ok(*record)
    }

    /// Pays out `tx_count + (uptime / 48) * 5`, then resets both counters.
    pub fn claim_rewards(&mut self, owner: Identity, signer: Identity) -> Result<u64> {
        if owner != signer {
            return Err(KernelError::Unauthorized);
        }
        let addr = node_address(&owner);
        let record = self.records.get_mut(&addr).ok_or(KernelError::NodeNotFound)?;

        let amount = pending_reward(record)?;
        let total = record
            .rewards_claimed
            .checked_add(amount)
            .ok_or(KernelError::Overflow)?;

        record.rewards_claimed = total;
        record.tx_count = 0;
        record.uptime = 0;
        Ok(amount)
    }

    pub(crate) fn restore(&mut self, record: NodeRecord) -> Result<()> {
        if self.records.insert(node_address(&record.owner), record).is_some() {
            return Err(KernelError::InvalidInput);
        }
        Ok(())
    }

    /// A receipt must belong to a restored record and appear only once.
    pub(crate) fn restore_receipt(&mut self, receipt: ProofReceipt) -> Result<()> {
        if self.get(&receipt.owner).is_none() {
            return Err(KernelError::InvalidInput);
        }
        let addr = receipt_address(&receipt.owner, &receipt.tx_hash);
        if self.receipts.insert(addr, receipt).is_some() {
            return Err(KernelError::InvalidInput);
        }
        Ok(())
    }
}
