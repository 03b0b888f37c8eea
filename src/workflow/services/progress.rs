//! Service layer for gate sequence mutation and progress reporting.
//!
//! Every mutation runs a load, mutate, compare-and-swap save cycle against
//! the store port, retrying a bounded number of times when a concurrent
//! writer wins the race. Domain validation failures abort before anything
//! is written.

use crate::workflow::{
    domain::{
        ActiveGate, Gate, GateSequence, OwnerId, Revision, TaskId, WorkflowDomainError, resolve,
        stage_label,
    },
    ports::{
        GateSequenceStore, GateStoreError, OwnerDirectory, OwnerDirectoryError, VersionedSequence,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Attempts per mutation before a persistent write conflict is surfaced.
const MAX_WRITE_ATTEMPTS: u32 = 3;

/// Gate definition supplied when creating or extending a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDraft {
    name: String,
    owner_name: String,
    owner_id: Option<OwnerId>,
}

impl GateDraft {
    /// Creates a draft with the required stage name and owner display name.
    #[must_use]
    pub fn new(name: impl Into<String>, owner_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_name: owner_name.into(),
            owner_id: None,
        }
    }

    /// Sets the owner directory reference.
    #[must_use]
    pub const fn with_owner_id(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }
}

/// Service-level errors for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkflowDomainError),
    /// Store operation failed; write conflicts that persist across the
    /// bounded retries are propagated here unchanged.
    #[error(transparent)]
    Store(#[from] GateStoreError),
    /// Owner directory lookup failed.
    #[error(transparent)]
    Directory(#[from] OwnerDirectoryError),
    /// No gate sequence is stored for the task.
    #[error("no gate sequence stored for task {0}")]
    SequenceNotFound(TaskId),
    /// A gate sequence is already stored for the task.
    #[error("gate sequence already stored for task {0}")]
    SequenceAlreadyExists(TaskId),
}

/// Result type for workflow service operations.
pub type WorkflowServiceResult<T> = Result<T, WorkflowServiceError>;

/// Owned snapshot of one resolved stage for display consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageView {
    /// 1-based position of the stage in the sequence.
    pub position: usize,
    /// Stage name.
    pub name: String,
    /// Cached display name of the responsible party.
    pub owner_name: String,
}

impl StageView {
    fn from_active(active: &ActiveGate<'_>) -> Self {
        Self {
            position: active.position,
            name: active.gate.name().as_str().to_owned(),
            owner_name: active.gate.owner_name().to_owned(),
        }
    }
}

/// Owned view of a task's derived workflow position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowProgress {
    /// The earliest pending stage, if any.
    pub current: Option<StageView>,
    /// The pending stage strictly after the current one, if any.
    pub next: Option<StageView>,
    /// The sequence length, completed stages included.
    pub total: usize,
}

impl WorkflowProgress {
    /// Renders the current stage as a `"<position>/<total> <owner_name>"`
    /// label, or `None` when no stage is pending.
    #[must_use]
    pub fn current_label(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|stage| stage_label(stage.position, self.total, &stage.owner_name))
    }
}

/// Workflow orchestration service over the store and directory ports.
#[derive(Clone)]
pub struct WorkflowProgressService<S, D, C>
where
    S: GateSequenceStore,
    D: OwnerDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<S, D, C> WorkflowProgressService<S, D, C>
where
    S: GateSequenceStore,
    D: OwnerDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow service.
    #[must_use]
    pub const fn new(store: Arc<S>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            store,
            directory,
            clock,
        }
    }

    /// Creates the gate sequence for a new task, optionally pre-seeded.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::SequenceAlreadyExists`] when the
    /// task already has a stored sequence, a domain error when a draft
    /// name is invalid, or a store error when persistence fails.
    pub async fn create_sequence(
        &self,
        task_id: TaskId,
        drafts: Vec<GateDraft>,
    ) -> WorkflowServiceResult<Revision> {
        let mut sequence = GateSequence::new();
        for draft in drafts {
            sequence.add_gate(draft.name, draft.owner_name, draft.owner_id)?;
        }
        match self.store.create(task_id, &sequence).await {
            Ok(revision) => Ok(revision),
            Err(GateStoreError::AlreadyExists(id)) => {
                Err(WorkflowServiceError::SequenceAlreadyExists(id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Appends a gate to the end of a task's sequence.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::SequenceNotFound`] when the task has
    /// no stored sequence, a domain error when the draft name is invalid,
    /// or a store error when the write keeps conflicting.
    pub async fn add_gate(&self, task_id: TaskId, draft: GateDraft) -> WorkflowServiceResult<()> {
        self.mutate(task_id, |sequence| {
            sequence.add_gate(
                draft.name.clone(),
                draft.owner_name.clone(),
                draft.owner_id,
            )
        })
        .await
    }

    /// Removes the gate at the given zero-based position and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::SequenceNotFound`] when the task has
    /// no stored sequence, a domain error when the position is out of
    /// bounds, or a store error when the write keeps conflicting.
    pub async fn remove_gate(&self, task_id: TaskId, index: usize) -> WorkflowServiceResult<Gate> {
        self.mutate(task_id, |sequence| sequence.remove_gate(index))
            .await
    }

    /// Moves the gate at `from` to rest at `to`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::SequenceNotFound`] when the task has
    /// no stored sequence, a domain error when either position is out of
    /// bounds, or a store error when the write keeps conflicting.
    pub async fn reorder(
        &self,
        task_id: TaskId,
        from: usize,
        to: usize,
    ) -> WorkflowServiceResult<()> {
        self.mutate(task_id, |sequence| sequence.reorder(from, to))
            .await
    }

    /// Sets the completion flag of the gate at the given position.
    ///
    /// The completion timestamp is derived per the domain invariant: a
    /// pending gate completed without an explicit `at` is stamped with the
    /// service clock's current time, and clearing completion clears it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::SequenceNotFound`] when the task has
    /// no stored sequence, a domain error when the position is out of
    /// bounds, or a store error when the write keeps conflicting.
    pub async fn set_completion(
        &self,
        task_id: TaskId,
        index: usize,
        completed: bool,
        at: Option<DateTime<Utc>>,
    ) -> WorkflowServiceResult<()> {
        self.mutate(task_id, |sequence| {
            sequence.set_completion(index, completed, at, &*self.clock)
        })
        .await
    }

    /// Renames the gate at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::SequenceNotFound`] when the task has
    /// no stored sequence, a domain error when the position is out of
    /// bounds or the name is empty, or a store error when the write keeps
    /// conflicting.
    pub async fn rename(
        &self,
        task_id: TaskId,
        index: usize,
        name: impl Into<String> + Send,
    ) -> WorkflowServiceResult<()> {
        let new_name = name.into();
        self.mutate(task_id, |sequence| sequence.rename(index, new_name.clone()))
            .await
    }

    /// Reassigns the gate at the given position to a new responsible party.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::SequenceNotFound`] when the task has
    /// no stored sequence, a domain error when the position is out of
    /// bounds, or a store error when the write keeps conflicting.
    pub async fn reassign(
        &self,
        task_id: TaskId,
        index: usize,
        owner_name: impl Into<String> + Send,
        owner_id: Option<OwnerId>,
    ) -> WorkflowServiceResult<()> {
        let new_owner = owner_name.into();
        self.mutate(task_id, |sequence| {
            sequence.reassign(index, new_owner.clone(), owner_id)
        })
        .await
    }

    /// Loads a task's sequence and returns its derived workflow position.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::SequenceNotFound`] when the task has
    /// no stored sequence or a store error when the load fails.
    pub async fn progress(&self, task_id: TaskId) -> WorkflowServiceResult<WorkflowProgress> {
        let stored = self
            .store
            .load(task_id)
            .await?
            .ok_or(WorkflowServiceError::SequenceNotFound(task_id))?;
        let active = resolve(&stored.sequence);
        Ok(WorkflowProgress {
            current: active.current.as_ref().map(StageView::from_active),
            next: active.next.as_ref().map(StageView::from_active),
            total: active.total,
        })
    }

    /// Refreshes the cached owner display names from the owner directory.
    ///
    /// Gates whose `owner_id` resolves are updated to the directory's
    /// current display name; gates without an `owner_id`, and gates whose
    /// reference the directory no longer knows, keep their cached name.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::SequenceNotFound`] when the task has
    /// no stored sequence, a directory error when a lookup fails, or a
    /// store error when the write keeps conflicting.
    pub async fn refresh_owner_names(&self, task_id: TaskId) -> WorkflowServiceResult<()> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let stored = self
                .store
                .load(task_id)
                .await?
                .ok_or(WorkflowServiceError::SequenceNotFound(task_id))?;
            let VersionedSequence {
                mut sequence,
                revision,
            } = stored;

            let mut changed = false;
            for index in 0..sequence.len() {
                let Some(owner_id) = sequence.gate(index).and_then(Gate::owner_id) else {
                    continue;
                };
                let Some(display_name) = self.directory.resolve_owner_name(owner_id).await? else {
                    continue;
                };
                let differs = sequence
                    .gate(index)
                    .is_some_and(|gate| gate.owner_name() != display_name);
                if differs {
                    sequence.refresh_owner_name(index, display_name)?;
                    changed = true;
                }
            }

            if !changed {
                return Ok(());
            }
            match self.store.save(task_id, &sequence, Some(revision)).await {
                Ok(_) => return Ok(()),
                Err(GateStoreError::Conflict { .. }) if attempt < MAX_WRITE_ATTEMPTS => {}
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Runs one load-mutate-save cycle, retrying on write conflicts.
    async fn mutate<T>(
        &self,
        task_id: TaskId,
        apply: impl Fn(&mut GateSequence) -> Result<T, WorkflowDomainError>,
    ) -> WorkflowServiceResult<T> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let stored = self
                .store
                .load(task_id)
                .await?
                .ok_or(WorkflowServiceError::SequenceNotFound(task_id))?;
            let VersionedSequence {
                mut sequence,
                revision,
            } = stored;

            let outcome = apply(&mut sequence)?;
            match self.store.save(task_id, &sequence, Some(revision)).await {
                Ok(_) => return Ok(outcome),
                Err(GateStoreError::Conflict { .. }) if attempt < MAX_WRITE_ATTEMPTS => {}
                Err(err) => return Err(err.into()),
            }
        }
    }
}
