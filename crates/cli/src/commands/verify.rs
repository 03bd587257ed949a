use ultranode_kernel::merkle::verify_path;
use ultranode_kernel::types::enums::HashKind;

use crate::hexutil::{parse_hash32, parse_path};

/// Check an already-hashed leaf against `root`.
pub fn check(kind: HashKind, leaf: &str, root: &str, path: &str, index: u32) -> anyhow::Result<bool> {
    let leaf = parse_hash32("leaf", leaf)?;
    let root = parse_hash32("root", root)?;
    let siblings = parse_path(path)?;
    Ok(verify_path(kind, &leaf, &root, index, &siblings))
}

pub fn run(kind: HashKind, leaf: &str, root: &str, path: &str, index: u32) -> anyhow::Result<bool> {
    let valid = check(kind, leaf, root, path, index)?;
    println!("Valid Proof? {}", valid);
    Ok(valid)
}
