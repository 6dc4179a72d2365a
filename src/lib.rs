//! Temperament: weighted probabilistic state machines for entity behavior
//!
//! Temperament drives autonomous entities (hostile NPCs, critters, turrets)
//! from a per-frame update hook. Each state has enter/update/exit callbacks
//! and an ordered list of guarded edges; when an edge fires, its destination
//! is drawn at random in proportion to the candidates' weights.
//!
//! # Core Concepts
//!
//! - **State**: a named mode of behavior, keyed by the `State` trait
//! - **Guards**: predicates over the entity and the time spent in a state
//! - **Edges**: guarded rules choosing the next state by weight
//! - **Registry**: the resolved configuration, indexed by dense state ids
//! - **Machine**: the tick loop, with an injected random source
//!
//! The machine is single-threaded and synchronous. It owns no entity data;
//! the entity is handed to every call as an explicit context.
//!
//! # Example
//!
//! ```rust
//! use temperament::builder::MachineBuilder;
//! use temperament::core::{Guard, Hooks};
//! use temperament::registry::StateConfig;
//! use temperament::state_enum;
//!
//! state_enum! {
//!     enum Wolf {
//!         Prowl,
//!         Pounce,
//!         Retreat,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Senses {
//!     prey_near: bool,
//!     growls: u32,
//! }
//!
//! let mut machine = MachineBuilder::new()
//!     .states(Wolf::ALL.iter().copied())
//!     .configure(
//!         StateConfig::new(Wolf::Prowl)
//!             .hooks(Hooks::new().exit(|s: &mut Senses| s.growls += 1))
//!             .weighted(
//!                 Guard::when(|s: &Senses| s.prey_near),
//!                 [(Wolf::Pounce, 3.0), (Wolf::Retreat, 1.0)],
//!             ),
//!     )
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut senses = Senses::default();
//! machine.start(&mut senses);
//! machine.update(&mut senses, 0.016);
//! assert_eq!(machine.current(), Some(&Wolf::Prowl));
//!
//! senses.prey_near = true;
//! machine.update(&mut senses, 0.016);
//! assert_ne!(machine.current(), Some(&Wolf::Prowl));
//! assert_eq!(senses.growls, 1);
//! ```

pub mod blueprint;
pub mod builder;
pub mod core;
pub mod diagnostic;
pub mod machine;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{Guard, Hooks, State, StateBehavior, StateId, TransitionEdge};
pub use diagnostic::Diagnostic;
pub use machine::{Change, MachineOptions, StateMachine, Status, Step};
pub use registry::{BuildError, StateConfig, StateRegistry};
