//! Stagegate: sequential approval-gate workflow core.
//!
//! This crate models the approval pipeline attached to a task: an ordered
//! sequence of named gates, each owned by one responsible party and each
//! independently completable. The task's position in its pipeline is never
//! stored; it is recomputed from the completion flags on every read, which
//! keeps insertion, removal, and reordering safe under concurrent editing
//! without cursor-repair logic.
//!
//! # Architecture
//!
//! Stagegate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external collaborators
//! - **Adapters**: Concrete implementations of ports (in-memory, etc.)
//!
//! # Modules
//!
//! - [`workflow`]: Gate records, gate sequences, active-gate resolution,
//!   and the orchestration service around them

pub mod workflow;
