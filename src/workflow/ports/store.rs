//! Store port for gate sequence persistence.
//!
//! The workflow core depends only on this narrow contract; how tasks are
//! otherwise modelled and persisted belongs to the surrounding application.

use crate::workflow::domain::{GateSequence, Revision, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gate sequence store operations.
pub type GateStoreResult<T> = Result<T, GateStoreError>;

/// A stored gate sequence paired with its revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedSequence {
    /// The persisted gate sequence.
    pub sequence: GateSequence,
    /// The revision the sequence was read at; pass it back to
    /// [`GateSequenceStore::save`] for a compare-and-swap write.
    pub revision: Revision,
}

/// Gate sequence persistence contract.
///
/// The core requires that mutations be applied to a sequence read
/// immediately beforehand. Implementations are expected to enforce either
/// optimistic concurrency via the revision check or whole-sequence
/// last-writer-wins; the in-memory adapter implements the former.
#[async_trait]
pub trait GateSequenceStore: Send + Sync {
    /// Loads the gate sequence for a task.
    ///
    /// Returns `None` when no sequence is stored for the task.
    ///
    /// # Errors
    ///
    /// Returns [`GateStoreError::Persistence`] when the underlying storage
    /// fails.
    async fn load(&self, task_id: TaskId) -> GateStoreResult<Option<VersionedSequence>>;

    /// Stores the gate sequence for a task that has none yet and returns
    /// the initial revision.
    ///
    /// The existence check and the write are atomic, so two racing
    /// creators cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`GateStoreError::AlreadyExists`] when a sequence is
    /// already stored for the task or [`GateStoreError::Persistence`]
    /// when the underlying storage fails.
    async fn create(&self, task_id: TaskId, sequence: &GateSequence)
    -> GateStoreResult<Revision>;

    /// Persists the gate sequence for a task and returns the new revision.
    ///
    /// With `expected = Some(revision)` the write succeeds only when the
    /// stored revision still matches; with `expected = None` the write is
    /// unconditional (create or overwrite).
    ///
    /// # Errors
    ///
    /// Returns [`GateStoreError::Conflict`] when the revision check fails
    /// or [`GateStoreError::Persistence`] when the underlying storage
    /// fails.
    async fn save(
        &self,
        task_id: TaskId,
        sequence: &GateSequence,
        expected: Option<Revision>,
    ) -> GateStoreResult<Revision>;

    /// Deletes the gate sequence for a task, if one is stored.
    ///
    /// Sequences are exclusively owned by their task, so this runs as part
    /// of task destruction.
    ///
    /// # Errors
    ///
    /// Returns [`GateStoreError::Persistence`] when the underlying storage
    /// fails.
    async fn delete(&self, task_id: TaskId) -> GateStoreResult<()>;
}

/// Errors returned by gate sequence store implementations.
#[derive(Debug, Clone, Error)]
pub enum GateStoreError {
    /// A sequence is already stored for the task.
    #[error("gate sequence already stored for task {0}")]
    AlreadyExists(TaskId),

    /// A concurrent writer updated the sequence since it was read.
    #[error(
        "conflicting write on task {task_id}: expected revision {expected}, found {actual:?}"
    )]
    Conflict {
        /// The task whose sequence was contended.
        task_id: TaskId,
        /// The revision the writer read.
        expected: Revision,
        /// The revision actually stored, when one exists.
        actual: Option<Revision>,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl GateStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
