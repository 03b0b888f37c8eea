//! Application services for approval-gate workflow orchestration.

mod progress;

pub use progress::{
    GateDraft, StageView, WorkflowProgress, WorkflowProgressService, WorkflowServiceError,
    WorkflowServiceResult,
};
