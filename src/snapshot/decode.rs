//! Snapshot decoding.

use byteorder::{ByteOrder, LittleEndian};

use crate::config::MAX_PROOF_DEPTH;
use crate::error::{KernelError, Result};
use crate::snapshot::encode::{MAGIC, SCHEMA_VERSION};
use crate::state::kernel::KernelState;
use crate::types::account::{AcceptedRoot, NodeRecord, ProgramConfig, ProofReceipt};
use crate::types::enums::{HashKind, PublishPolicy};
use crate::types::id::{Hash32, Identity, Version};

struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.offset.checked_add(len).ok_or(KernelError::InvalidInput)?;
        if end > self.buf.len() {
            return Err(KernelError::InvalidInput); // Truncated
        }
        let slice = &self.buf[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    fn u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    fn hash(&mut self) -> Result<Hash32> {
        let mut out = [0u8; 32];
        out.copy_from_slice(self.take(32)?);
        Ok(out)
    }

    fn identity(&mut self) -> Result<Identity> {
        Ok(Identity(self.hash()?))
    }
}

pub fn decode_state(buf: &[u8]) -> Result<KernelState> {
    let mut r = Reader { buf, offset: 0 };

    if r.take(4)? != MAGIC.as_slice() {
        return Err(KernelError::InvalidInput); // Bad magic
    }
    if r.u32()? != SCHEMA_VERSION {
        return Err(KernelError::InvalidInput);
    }

    let mut state = KernelState::new();
    state.version = Version(r.u64()?);

    state.config = match r.u8()? {
        0 => None,
        1 => {
            let admin = r.identity()?;
            let hash = HashKind::from_u8(r.u8()?).ok_or(KernelError::InvalidInput)?;
            let publish_policy = PublishPolicy::from_u8(r.u8()?).ok_or(KernelError::InvalidInput)?;
            let max_proof_depth = r.u8()?;
            if max_proof_depth == 0 || max_proof_depth > MAX_PROOF_DEPTH {
                return Err(KernelError::InvalidInput);
            }
            Some(ProgramConfig { admin, hash, publish_policy, max_proof_depth })
        }
        _ => return Err(KernelError::InvalidInput),
    };

    let root_count = r.u32()?;
    for _ in 0..root_count {
        let root = r.hash()?;
        let slot = r.u64()?;
        let authority = r.identity()?;
        state.registry.restore(AcceptedRoot { root, slot, authority })?;
    }

    let node_count = r.u32()?;
    for _ in 0..node_count {
        let record = NodeRecord {
            owner: r.identity()?,
            tx_hash: r.hash()?,
            index: r.u32()?,
            root: r.hash()?,
            tx_count: r.u32()?,
            uptime: r.u32()?,
            rewards_claimed: r.u64()?,
        };
        state.nodes.restore(record)?;
    }

    let receipt_count = r.u32()?;
    for _ in 0..receipt_count {
        let receipt = ProofReceipt {
            owner: r.identity()?,
            tx_hash: r.hash()?,
        };
        state.nodes.restore_receipt(receipt)?;
    }

    if r.offset != buf.len() {
        return Err(KernelError::InvalidInput); // Trailing bytes
    }

    Ok(state)
}
