// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Program enums.

use core::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::error::KernelError;

/// Pairwise hash used to combine Merkle nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HashKind {
    Sha256 = 0,
    Blake3 = 1,
}

impl HashKind {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(HashKind::Sha256),
            1 => Some(HashKind::Blake3),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashKind::Sha256 => "sha256",
            HashKind::Blake3 => "blake3",
        }
    }
}

impl FromStr for HashKind {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(HashKind::Sha256),
            "blake3" => Ok(HashKind::Blake3),
            _ => Err(KernelError::InvalidInput),
        }
    }
}

impl Default for HashKind {
    fn default() -> Self {
        HashKind::Sha256
    }
}

/// Who may publish roots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PublishPolicy {
    /// Any signer may publish under its own authority.
    Open = 0,
    /// Only the configured admin may publish.
    AdminOnly = 1,
}

impl PublishPolicy {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(PublishPolicy::Open),
            1 => Some(PublishPolicy::AdminOnly),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PublishPolicy::Open => "open",
            PublishPolicy::AdminOnly => "admin_only",
        }
    }
}

impl FromStr for PublishPolicy {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(PublishPolicy::Open),
            "admin_only" => Ok(PublishPolicy::AdminOnly),
            _ => Err(KernelError::InvalidInput),
        }
    }
}

impl Default for PublishPolicy {
    fn default() -> Self {
        PublishPolicy::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for kind in [HashKind::Sha256, HashKind::Blake3] {
            assert_eq!(kind.name().parse::<HashKind>(), Ok(kind));
        }
        for policy in [PublishPolicy::Open, PublishPolicy::AdminOnly] {
            assert_eq!(policy.name().parse::<PublishPolicy>(), Ok(policy));
        }
        assert!("md5".parse::<HashKind>().is_err());
    }
}
