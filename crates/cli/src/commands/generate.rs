use anyhow::{bail, Context};
use ultranode_kernel::merkle::{build_root, generate_proof, leaf_hash};
use ultranode_kernel::types::enums::HashKind;
use ultranode_kernel::types::id::Hash32;

use crate::hexutil::join_hex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProof {
    pub root: Hash32,
    pub leaf: Hash32,
    pub index: u32,
    pub path: Vec<Hash32>,
}

/// Hash each comma-separated entry into a leaf, then build the root and the
/// sibling path for `index`.
pub fn generate(kind: HashKind, data: &str, index: u32) -> anyhow::Result<GeneratedProof> {
    let leaves: Vec<Hash32> = data.split(',').map(|s| leaf_hash(kind, s.as_bytes())).collect();

    let root = build_root(kind, &leaves).context("no leaves")?;
    let Some(path) = generate_proof(kind, &leaves, index) else {
        bail!("index {} out of range for {} leaves", index, leaves.len());
    };

    Ok(GeneratedProof {
        root,
        leaf: leaves[index as usize],
        index,
        path,
    })
}

pub fn run(kind: HashKind, data: &str, index: u32) -> anyhow::Result<()> {
    let proof = generate(kind, data, index)?;

    println!("Merkle Root: {}", hex::encode(proof.root));
    println!("Leaf Hash: {}", hex::encode(proof.leaf));
    println!("Proof Path: {}", join_hex(&proof.path));
    Ok(())
}
