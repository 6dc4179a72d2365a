//! Core building blocks of a behavior state machine.
//!
//! - State keys and dense state ids via the `State` trait
//! - Guard predicates deciding when an edge fires
//! - Lifecycle callbacks via the `StateBehavior` trait
//! - Transition edges carrying weighted candidates
//!
//! Nothing in this module owns entity data; callbacks and guards receive it
//! as an explicit context argument.

mod behavior;
mod edge;
mod guard;
mod state;

pub use behavior::{Hooks, Inert, StateBehavior};
pub use edge::{Candidate, TransitionEdge};
pub use guard::Guard;
pub use state::{State, StateId};
