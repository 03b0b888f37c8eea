//! Directory port for resolving owner references to display names.

use crate::workflow::domain::OwnerId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for owner directory lookups.
pub type OwnerDirectoryResult<T> = Result<T, OwnerDirectoryError>;

/// Owner display-name lookup contract.
///
/// The workflow core never requires the directory to function: a gate's
/// cached `owner_name` is used whenever a lookup returns no entry, so an
/// absent or stale directory degrades the display, not the workflow.
#[async_trait]
pub trait OwnerDirectory: Send + Sync {
    /// Resolves an owner reference to its current display name.
    ///
    /// Returns `None` when the directory has no entry for the reference.
    ///
    /// # Errors
    ///
    /// Returns [`OwnerDirectoryError::Lookup`] when the lookup itself
    /// fails.
    async fn resolve_owner_name(&self, owner_id: OwnerId) -> OwnerDirectoryResult<Option<String>>;
}

/// Errors returned by owner directory implementations.
#[derive(Debug, Clone, Error)]
pub enum OwnerDirectoryError {
    /// Directory-layer failure.
    #[error("owner directory lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl OwnerDirectoryError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
