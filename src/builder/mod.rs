//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and a macro for declaring state
//! enums, so a behavior can be authored with minimal boilerplate.

pub mod machine;
pub mod macros;

pub use machine::MachineBuilder;
