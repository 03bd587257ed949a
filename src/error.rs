//! Error types.

use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// The root is already present in the registry.
    DuplicateRoot,
    /// The referenced root was never published.
    UnknownRoot,
    /// The sibling path does not recompute to the target root.
    InvalidProof,
    /// The declared identity does not match the proven signer, or the
    /// signer lacks the privilege for this operation.
    Unauthorized,
    /// A program operation ran before `initialize`.
    NotInitialized,
    /// `initialize` ran twice.
    AlreadyInitialized,
    /// Sibling path is longer than the configured maximum depth.
    ProofTooDeep,
    /// The submitter's record already holds this transaction hash.
    ReplayedProof,
    /// No node record exists for the owner.
    NodeNotFound,
    /// Arithmetic overflow on a counter.
    Overflow,
    /// Malformed bytes or parameters.
    InvalidInput,
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            KernelError::DuplicateRoot => "root already published",
            KernelError::UnknownRoot => "root not found in registry",
            KernelError::InvalidProof => "merkle proof does not match root",
            KernelError::Unauthorized => "signer is not authorized",
            KernelError::NotInitialized => "program not initialized",
            KernelError::AlreadyInitialized => "program already initialized",
            KernelError::ProofTooDeep => "proof exceeds maximum depth",
            KernelError::ReplayedProof => "transaction hash already accepted for this node",
            KernelError::NodeNotFound => "node record not found",
            KernelError::Overflow => "counter overflow",
            KernelError::InvalidInput => "invalid input",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KernelError {}

pub type KernelResult<T> = core::result::Result<T, KernelError>;
pub type Result<T> = KernelResult<T>;
