//! Active-gate resolution: deriving the current and next stage from a
//! gate sequence.
//!
//! Resolution is a single left-to-right scan over the completion flags.
//! Nothing is sorted, nothing is mutated, and the result is never stored:
//! any out-of-order completion or later edit of the sequence is reflected
//! correctly on the next read with no migration step.

use super::{Gate, GateSequence};

/// One resolved stage: a borrowed gate paired with its 1-based display
/// position within the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveGate<'a> {
    /// 1-based position of the gate in the sequence.
    pub position: usize,
    /// The gate occupying that position.
    pub gate: &'a Gate,
}

/// The derived workflow position of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveGates<'a> {
    /// The earliest pending gate in sequence order, if any.
    pub current: Option<ActiveGate<'a>>,
    /// The pending gate strictly after the current one, skipping any
    /// completed gates in between, if any.
    pub next: Option<ActiveGate<'a>>,
    /// The sequence length, completed gates included.
    pub total: usize,
}

impl ActiveGates<'_> {
    /// Returns whether every gate in a non-empty sequence has been passed.
    #[must_use]
    pub const fn is_all_complete(&self) -> bool {
        self.total > 0 && self.current.is_none()
    }
}

/// Computes the current and next actionable gate of a sequence.
///
/// The scan walks the gates once in order. The first pending gate becomes
/// `current`, the second becomes `next`, and the scan stops there.
/// Completed gates are skipped entirely; one sitting between two pending
/// gates is never reported as `next`. An empty or fully-completed sequence
/// resolves to no current and no next gate.
///
/// The resolver never fails on stored data it did not validate itself: a
/// completed gate without a timestamp still counts as completed.
#[must_use]
pub fn resolve(sequence: &GateSequence) -> ActiveGates<'_> {
    let mut current = None;
    let mut next = None;

    for (offset, gate) in sequence.gates().iter().enumerate() {
        if gate.is_completed() {
            continue;
        }
        let active = ActiveGate {
            position: offset + 1,
            gate,
        };
        if current.is_none() {
            current = Some(active);
        } else {
            next = Some(active);
            break;
        }
    }

    ActiveGates {
        current,
        next,
        total: sequence.len(),
    }
}
