//! Approval-gate workflow management for Stagegate.
//!
//! This module implements the sequential gate model: creating and mutating
//! the ordered gate sequence attached to a task, deriving the current and
//! next actionable gate from the completion flags on every read, and
//! rendering the derived position as a compact display label. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
