//! In-memory owner directory for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workflow::{
    domain::OwnerId,
    ports::{OwnerDirectory, OwnerDirectoryError, OwnerDirectoryResult},
};

/// Thread-safe in-memory owner directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOwnerDirectory {
    entries: Arc<RwLock<HashMap<OwnerId, String>>>,
}

impl InMemoryOwnerDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the display name for an owner.
    ///
    /// # Errors
    ///
    /// Returns [`OwnerDirectoryError::Lookup`] when the directory lock is
    /// poisoned.
    pub fn insert(
        &self,
        owner_id: OwnerId,
        display_name: impl Into<String>,
    ) -> OwnerDirectoryResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| OwnerDirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        entries.insert(owner_id, display_name.into());
        Ok(())
    }
}

#[async_trait]
impl OwnerDirectory for InMemoryOwnerDirectory {
    async fn resolve_owner_name(&self, owner_id: OwnerId) -> OwnerDirectoryResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|err| OwnerDirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(entries.get(&owner_id).cloned())
    }
}
