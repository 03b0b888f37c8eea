//! Error types for workflow domain validation.

use thiserror::Error;

/// Errors returned while constructing or mutating workflow domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowDomainError {
    /// The gate name is empty after trimming.
    #[error("gate name must not be empty")]
    EmptyGateName,

    /// A mutation referenced a position outside the sequence.
    #[error("gate position {index} is out of bounds for a sequence of {len} gates")]
    PositionOutOfBounds {
        /// The zero-based position the caller supplied.
        index: usize,
        /// The sequence length at the time of the call.
        len: usize,
    },
}
