//! Domain model for the approval-gate workflow.
//!
//! The workflow domain models gate records, the ordered gate sequence, and
//! the active-gate resolution algorithm while keeping all infrastructure
//! concerns outside of the domain boundary.

mod error;
mod format;
mod gate;
mod ids;
mod resolver;
mod sequence;

pub use error::WorkflowDomainError;
pub use format::stage_label;
pub use gate::{Gate, GateName, GateStatus};
pub use ids::{OwnerId, Revision, TaskId};
pub use resolver::{ActiveGate, ActiveGates, resolve};
pub use sequence::GateSequence;
