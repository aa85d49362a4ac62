//! Tasktrack: task tracking core.
//!
//! This crate provides the workflow engine behind a task-tracking
//! application: the status state machine, the priority/assignee rule,
//! due-date classification, filtering, and bulk operations over a
//! selection with partial-success reporting.
//!
//! # Architecture
//!
//! Tasktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and user prompts
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task workflow, board state, and bulk operations

pub mod task;
