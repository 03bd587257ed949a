// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Length in bytes of every hash, root and identity handled by the kernel.
pub const DIGEST_LEN: usize = 32;

/// Seed tag for the program configuration entry.
pub const CONFIG_SEED: &[u8] = b"config";

/// Seed tag for accepted roots, followed by the root bytes.
pub const ACCEPTED_SEED: &[u8] = b"accepted";

/// Seed tag for per-owner node records, followed by the owner identity.
pub const NODE_SEED: &[u8] = b"node";

/// Seed tag for proof receipts, followed by the owner and the tx hash.
pub const RECEIPT_SEED: &[u8] = b"receipt";

/// Upper bound on sibling path length. The leaf index is a `u32`, so a
/// deeper path could not address its own leaf.
pub const MAX_PROOF_DEPTH: u8 = 32;

/// Uptime ticks that make up one rewarded epoch.
pub const UPTIME_EPOCH: u32 = 48;

/// Reward units paid per completed uptime epoch.
pub const UPTIME_EPOCH_REWARD: u64 = 5;

/// Kernel protocol version reported in proofs.
pub const KERNEL_VERSION: u64 = 1;
