//! Gate record: one named approval stage within a task's workflow.

use super::{OwnerId, WorkflowDomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, non-empty gate name.
///
/// Names label a stage (for example "Design" or "Vendor Quote") and are not
/// required to be unique within a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateName(String);

impl GateName {
    /// Creates a validated gate name.
    ///
    /// Leading and trailing whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::EmptyGateName`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkflowDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WorkflowDomainError::EmptyGateName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for GateName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion status of a gate.
///
/// The tagged representation closes the loosely-typed gap where a stored
/// record could claim completion without carrying a timestamp: such a
/// record deserializes to [`GateStatus::Completed`] with `at` absent,
/// meaning "completed, timestamp unknown", rather than failing the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GateStatus {
    /// The stage has not been passed.
    Pending,
    /// The stage has been passed.
    Completed {
        /// When the stage was passed, if recorded.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        at: Option<DateTime<Utc>>,
    },
}

impl GateStatus {
    /// Returns whether the gate has been passed.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Returns the completion timestamp, when recorded.
    #[must_use]
    pub const fn completed_at(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Pending => None,
            Self::Completed { at } => at,
        }
    }
}

/// One approval stage: a named gate owned by one responsible party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    name: GateName,
    owner_name: String,
    owner_id: Option<OwnerId>,
    status: GateStatus,
}

impl Gate {
    /// Creates a new pending gate.
    #[must_use]
    pub const fn new(name: GateName, owner_name: String, owner_id: Option<OwnerId>) -> Self {
        Self {
            name,
            owner_name,
            owner_id,
            status: GateStatus::Pending,
        }
    }

    /// Returns the stage name.
    #[must_use]
    pub const fn name(&self) -> &GateName {
        &self.name
    }

    /// Returns the cached display name of the responsible party.
    #[must_use]
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Returns the owner directory reference, if any.
    #[must_use]
    pub const fn owner_id(&self) -> Option<OwnerId> {
        self.owner_id
    }

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> GateStatus {
        self.status
    }

    /// Returns whether the gate has been passed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Returns the completion timestamp, when recorded.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.status.completed_at()
    }

    pub(super) fn set_name(&mut self, name: GateName) {
        self.name = name;
    }

    pub(super) fn set_owner(&mut self, owner_name: String, owner_id: Option<OwnerId>) {
        self.owner_name = owner_name;
        self.owner_id = owner_id;
    }

    pub(super) fn set_owner_name(&mut self, owner_name: String) {
        self.owner_name = owner_name;
    }

    pub(super) const fn set_status(&mut self, status: GateStatus) {
        self.status = status;
    }
}
