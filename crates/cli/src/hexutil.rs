use anyhow::{bail, Context};
use ultranode_kernel::types::enums::HashKind;
use ultranode_kernel::types::id::Hash32;

pub fn parse_hash32(label: &str, raw: &str) -> anyhow::Result<Hash32> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(trimmed).with_context(|| format!("{label} is not valid hex"))?;
    match <Hash32>::try_from(bytes.as_slice()) {
        Ok(h) => Ok(h),
        Err(_) => bail!("{label} must be 32 bytes, got {}", bytes.len()),
    }
}

/// Comma-separated hex hashes. An empty string is an empty path.
pub fn parse_path(raw: &str) -> anyhow::Result<Vec<Hash32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, s)| parse_hash32(&format!("path[{i}]"), s))
        .collect()
}

pub fn join_hex(hashes: &[Hash32]) -> String {
    hashes.iter().map(hex::encode).collect::<Vec<_>>().join(",")
}

pub fn parse_kind(raw: &str) -> anyhow::Result<HashKind> {
    raw.parse()
        .map_err(|_| anyhow::anyhow!("unknown hash {raw:?} (expected sha256 or blake3)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_empty() {
        assert!(parse_path("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_hash_prefix() {
        let h = parse_hash32("root", &format!("0x{}", hex::encode([7u8; 32]))).unwrap();
        assert_eq!(h, [7u8; 32]);
    }

    #[test]
    fn test_short_hash_rejected() {
        assert!(parse_hash32("leaf", "abcd").is_err());
    }
}
