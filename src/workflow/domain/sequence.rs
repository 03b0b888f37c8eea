//! Ordered gate sequence: the approval pipeline attached to one task.

use super::{Gate, GateName, GateStatus, OwnerId, WorkflowDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Ordered collection of gates for one task.
///
/// List order is the single source of truth for stage precedence; no rank
/// field is stored on the gates and no current-position cursor is persisted.
/// The derived position is recomputed from the completion flags on every
/// read via [`resolve`](super::resolve), which makes insertion, removal,
/// and reordering safe without cursor-repair logic.
///
/// Every mutation validates its inputs before touching the list, so a
/// failed call leaves the sequence exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateSequence {
    gates: Vec<Gate>,
}

impl GateSequence {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self { gates: Vec::new() }
    }

    /// Reconstructs a sequence from persisted gates.
    #[must_use]
    pub const fn from_gates(gates: Vec<Gate>) -> Self {
        Self { gates }
    }

    /// Returns the gates in precedence order.
    #[must_use]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Returns the gate at the given zero-based position, if any.
    #[must_use]
    pub fn gate(&self, index: usize) -> Option<&Gate> {
        self.gates.get(index)
    }

    /// Returns the number of gates, completed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns whether the sequence has no gates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Appends a new pending gate at the end of the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::EmptyGateName`] when the name is
    /// empty after trimming.
    pub fn add_gate(
        &mut self,
        name: impl Into<String>,
        owner_name: impl Into<String>,
        owner_id: Option<OwnerId>,
    ) -> Result<(), WorkflowDomainError> {
        let gate_name = GateName::new(name)?;
        self.gates
            .push(Gate::new(gate_name, owner_name.into(), owner_id));
        Ok(())
    }

    /// Removes and returns the gate at the given position.
    ///
    /// Later gates shift down one position; their own fields are untouched,
    /// and the derived workflow position reflects the new order on the next
    /// resolve.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::PositionOutOfBounds`] when `index`
    /// is past the end of the sequence.
    pub fn remove_gate(&mut self, index: usize) -> Result<Gate, WorkflowDomainError> {
        self.check_bounds(index)?;
        Ok(self.gates.remove(index))
    }

    /// Moves the gate at `from` so that it comes to rest at `to`, shifting
    /// the gates in between.
    ///
    /// Only positions change; every gate's own fields are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::PositionOutOfBounds`] when either
    /// index is past the end of the sequence. A failed call does not move
    /// anything.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), WorkflowDomainError> {
        self.check_bounds(from)?;
        self.check_bounds(to)?;
        if from != to {
            let gate = self.gates.remove(from);
            self.gates.insert(to, gate);
        }
        Ok(())
    }

    /// Sets the completion flag of the gate at the given position, deriving
    /// the completion timestamp.
    ///
    /// Marking a pending gate completed without an explicit `at` stamps the
    /// clock's current time; an explicit `at` is recorded as given. Marking
    /// an already-completed gate completed again without `at` keeps its
    /// existing timestamp. Clearing completion always clears the timestamp.
    ///
    /// Completion out of sequence order is supported: any gate may be
    /// passed or reopened regardless of the state of earlier gates, and the
    /// resolver skips completed gates wherever they sit.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::PositionOutOfBounds`] when `index`
    /// is past the end of the sequence.
    pub fn set_completion(
        &mut self,
        index: usize,
        completed: bool,
        at: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        let len = self.gates.len();
        let gate = self
            .gates
            .get_mut(index)
            .ok_or(WorkflowDomainError::PositionOutOfBounds { index, len })?;

        let status = if completed {
            match (at, gate.status()) {
                (Some(timestamp), _) => GateStatus::Completed {
                    at: Some(timestamp),
                },
                (None, GateStatus::Completed { at: existing }) => {
                    GateStatus::Completed { at: existing }
                }
                (None, GateStatus::Pending) => GateStatus::Completed {
                    at: Some(clock.utc()),
                },
            }
        } else {
            GateStatus::Pending
        };
        gate.set_status(status);
        Ok(())
    }

    /// Renames the gate at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::PositionOutOfBounds`] when `index`
    /// is past the end of the sequence, or
    /// [`WorkflowDomainError::EmptyGateName`] when the new name is empty
    /// after trimming. A failed call changes nothing.
    pub fn rename(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), WorkflowDomainError> {
        let gate_name = GateName::new(name)?;
        let len = self.gates.len();
        let gate = self
            .gates
            .get_mut(index)
            .ok_or(WorkflowDomainError::PositionOutOfBounds { index, len })?;
        gate.set_name(gate_name);
        Ok(())
    }

    /// Reassigns the gate at the given position to a new responsible party.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::PositionOutOfBounds`] when `index`
    /// is past the end of the sequence.
    pub fn reassign(
        &mut self,
        index: usize,
        owner_name: impl Into<String>,
        owner_id: Option<OwnerId>,
    ) -> Result<(), WorkflowDomainError> {
        let len = self.gates.len();
        let gate = self
            .gates
            .get_mut(index)
            .ok_or(WorkflowDomainError::PositionOutOfBounds { index, len })?;
        gate.set_owner(owner_name.into(), owner_id);
        Ok(())
    }

    /// Replaces the cached owner display name of the gate at the given
    /// position without touching its directory reference.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::PositionOutOfBounds`] when `index`
    /// is past the end of the sequence.
    pub fn refresh_owner_name(
        &mut self,
        index: usize,
        owner_name: impl Into<String>,
    ) -> Result<(), WorkflowDomainError> {
        let len = self.gates.len();
        let gate = self
            .gates
            .get_mut(index)
            .ok_or(WorkflowDomainError::PositionOutOfBounds { index, len })?;
        gate.set_owner_name(owner_name.into());
        Ok(())
    }

    fn check_bounds(&self, index: usize) -> Result<(), WorkflowDomainError> {
        let len = self.gates.len();
        if index >= len {
            return Err(WorkflowDomainError::PositionOutOfBounds { index, len });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a GateSequence {
    type Item = &'a Gate;
    type IntoIter = std::slice::Iter<'a, Gate>;

    fn into_iter(self) -> Self::IntoIter {
        self.gates.iter()
    }
}
