//! Step definitions for bulk operation scenarios.

mod given;
mod then;
mod when;
pub mod world;
