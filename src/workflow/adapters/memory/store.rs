//! In-memory gate sequence store with optimistic concurrency.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workflow::{
    domain::{GateSequence, Revision, TaskId},
    ports::{GateSequenceStore, GateStoreError, GateStoreResult, VersionedSequence},
};

/// Thread-safe in-memory gate sequence store.
///
/// Revisions start at [`Revision::INITIAL`] on first save and increment on
/// every subsequent write, giving the compare-and-swap contract of
/// [`GateSequenceStore::save`] real teeth in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateSequenceStore {
    state: Arc<RwLock<HashMap<TaskId, VersionedSequence>>>,
}

impl InMemoryGateSequenceStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> GateStoreError {
    GateStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl GateSequenceStore for InMemoryGateSequenceStore {
    async fn load(&self, task_id: TaskId) -> GateStoreResult<Option<VersionedSequence>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(&task_id).cloned())
    }

    async fn create(
        &self,
        task_id: TaskId,
        sequence: &GateSequence,
    ) -> GateStoreResult<Revision> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.contains_key(&task_id) {
            return Err(GateStoreError::AlreadyExists(task_id));
        }
        state.insert(
            task_id,
            VersionedSequence {
                sequence: sequence.clone(),
                revision: Revision::INITIAL,
            },
        );
        Ok(Revision::INITIAL)
    }

    async fn save(
        &self,
        task_id: TaskId,
        sequence: &GateSequence,
        expected: Option<Revision>,
    ) -> GateStoreResult<Revision> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let stored = state.get(&task_id).map(|entry| entry.revision);

        let revision = match expected {
            Some(expected_revision) => {
                if stored != Some(expected_revision) {
                    return Err(GateStoreError::Conflict {
                        task_id,
                        expected: expected_revision,
                        actual: stored,
                    });
                }
                expected_revision.next()
            }
            None => stored.map_or(Revision::INITIAL, Revision::next),
        };

        state.insert(
            task_id,
            VersionedSequence {
                sequence: sequence.clone(),
                revision,
            },
        );
        Ok(revision)
    }

    async fn delete(&self, task_id: TaskId) -> GateStoreResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.remove(&task_id);
        Ok(())
    }
}
