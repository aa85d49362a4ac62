//! Task workflow for Tasktrack.
//!
//! This module implements the rules behind the task list: which status
//! changes are legal, when a task needs an assignee, how due dates are
//! bucketed, which tasks a filter shows, and how bulk operations apply to
//! a selection while reporting what they skipped. The module follows
//! hexagonal architecture:
//!
//! - Domain types and the board reducer in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
