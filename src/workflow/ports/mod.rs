//! Port contracts for the approval-gate workflow.
//!
//! Ports define infrastructure-agnostic interfaces used by workflow
//! services.

pub mod directory;
pub mod store;

pub use directory::{OwnerDirectory, OwnerDirectoryError, OwnerDirectoryResult};
pub use store::{GateSequenceStore, GateStoreError, GateStoreResult, VersionedSequence};
