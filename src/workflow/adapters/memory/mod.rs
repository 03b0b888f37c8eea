//! In-memory adapters for tests and lightweight embedding.

mod directory;
mod store;

pub use directory::InMemoryOwnerDirectory;
pub use store::InMemoryGateSequenceStore;
