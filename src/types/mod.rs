pub mod id;
pub mod enums;
pub mod account;

pub use account::{AcceptedRoot, InitParams, NodeRecord, ProgramConfig, ProofReceipt};
pub use enums::{HashKind, PublishPolicy};
pub use id::{Address, Hash32, Identity, Version};
