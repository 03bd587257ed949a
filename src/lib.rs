// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![no_std]

//! ultranode-kernel: a deterministic, no_std Merkle root registry and proof verifier.

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod config;
pub mod error;
pub mod types;
pub mod merkle;
pub mod state;
pub mod event;
pub mod snapshot;
pub mod verify;
pub mod proof;
pub mod replay;

#[cfg(test)]
pub mod tests;
