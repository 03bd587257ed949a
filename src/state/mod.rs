pub mod address;
pub mod registry;
pub mod nodes;
pub mod verifier;
pub mod command;
pub mod kernel;

pub use command::Command;
pub use kernel::{KernelState, Outcome};
pub use nodes::NodeStore;
pub use registry::RootRegistry;
pub use verifier::{ProofSubmission, ProofVerifier};
