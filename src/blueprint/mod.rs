//! Declarative machine descriptions.
//!
//! A [`Blueprint`] describes states and weighted edges as data, so behavior
//! tables can be authored and tuned outside Rust code. Guards and hooks that
//! need entity specific logic are referenced by name and resolved against a
//! [`Library`] when the blueprint is compiled.
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use temperament::blueprint::{Blueprint, Library};
//! use temperament::core::Guard;
//!
//! struct Npc {
//!     found: bool,
//! }
//!
//! let blueprint = Blueprint::from_json(r#"{
//!     "states": ["Idle", "Seek", "Attack", "Flee"],
//!     "initial": "Idle",
//!     "transitions": {
//!         "Idle": [{ "when": { "after": 1.0 }, "to": [{ "state": "Seek" }] }],
//!         "Seek": [{
//!             "when": { "named": "found" },
//!             "to": [{ "state": "Attack", "weight": 0.2 }, { "state": "Flee", "weight": 0.8 }]
//!         }]
//!     }
//! }"#)
//! .unwrap();
//!
//! let library = Library::new().guard("found", Guard::when(|n: &Npc| n.found));
//! let mut machine = blueprint
//!     .into_machine(&library, StdRng::seed_from_u64(1))
//!     .unwrap();
//!
//! let mut npc = Npc { found: false };
//! machine.start(&mut npc);
//! assert_eq!(machine.current().map(String::as_str), Some("Idle"));
//! ```

mod error;
mod library;

pub use error::BlueprintError;
pub use library::Library;

use crate::builder::MachineBuilder;
use crate::core::{Candidate, Guard, TransitionEdge};
use crate::machine::StateMachine;
use crate::registry::StateConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Data form of a guard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardSpec {
    Always,
    Never,
    /// Holds once the machine has been in the state this many seconds.
    After(f64),
    /// Looked up in the [`Library`].
    Named(String),
    All(Vec<GuardSpec>),
    Any(Vec<GuardSpec>),
    Not(Box<GuardSpec>),
}

impl GuardSpec {
    fn compile<C: 'static>(&self, library: &Library<C>) -> Result<Guard<C>, BlueprintError> {
        Ok(match self {
            Self::Always => Guard::always(),
            Self::Never => Guard::never(),
            Self::After(seconds) => Guard::after(*seconds),
            Self::Named(name) => library
                .get_guard(name)
                .cloned()
                .ok_or_else(|| BlueprintError::UnknownGuard(name.clone()))?,
            Self::All(specs) => specs.iter().try_fold(Guard::always(), |acc, spec| {
                Ok::<_, BlueprintError>(acc.and(spec.compile(library)?))
            })?,
            Self::Any(specs) => specs.iter().try_fold(Guard::never(), |acc, spec| {
                Ok::<_, BlueprintError>(acc.or(spec.compile(library)?))
            })?,
            Self::Not(spec) => spec.compile(library)?.negate(),
        })
    }
}

/// Data form of a transition edge. An empty `to` list halts the machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub when: GuardSpec,
    #[serde(default)]
    pub to: Vec<Candidate<String>>,
}

/// Serializable description of a whole machine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Every state name, in declaration order.
    pub states: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    #[serde(default)]
    pub debug: bool,
    /// Outgoing edges per state, in evaluation order.
    #[serde(default)]
    pub transitions: BTreeMap<String, Vec<EdgeSpec>>,
    /// Name of the library hooks attached to each state.
    #[serde(default)]
    pub hooks: BTreeMap<String, String>,
}

impl Blueprint {
    pub fn from_json(text: &str) -> Result<Self, BlueprintError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, BlueprintError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// State [`StateMachine::start`] should enter, if the blueprint names one.
    pub fn initial(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    /// Turn the blueprint into configuration records.
    ///
    /// Fails if a named guard or hook is missing from `library`. States that
    /// appear in `transitions` or `hooks` but not in `states` still produce a
    /// record; the registry skips it with a diagnostic.
    pub fn compile<C: 'static>(
        &self,
        library: &Library<C>,
    ) -> Result<Vec<StateConfig<String, C>>, BlueprintError> {
        let configured: BTreeSet<&String> =
            self.transitions.keys().chain(self.hooks.keys()).collect();

        let mut configs = Vec::with_capacity(configured.len());
        for state in configured {
            let mut config = StateConfig::new(state.clone());

            if let Some(name) = self.hooks.get(state) {
                let hooks = library
                    .get_hooks(name)
                    .ok_or_else(|| BlueprintError::UnknownHooks(name.clone()))?;
                config = config.shared_behavior(hooks.clone());
            }

            for edge in self.transitions.get(state).into_iter().flatten() {
                let guard = edge.when.compile(library)?;
                let candidates = edge.to.iter().cloned();
                config = config.edge(TransitionEdge::new(guard).candidates_from(candidates));
            }

            configs.push(config);
        }
        Ok(configs)
    }

    /// Compile and build a machine around `rng`.
    ///
    /// The machine is returned uninitialized; call
    /// [`StateMachine::start`] with the entity context to enter the
    /// blueprint's initial state.
    pub fn into_machine<C: 'static, R: Rng>(
        &self,
        library: &Library<C>,
        rng: R,
    ) -> Result<StateMachine<String, C, R>, BlueprintError> {
        let mut builder = MachineBuilder::with_rng(rng)
            .states(self.states.iter().cloned())
            .debug(self.debug);
        for config in self.compile(library)? {
            builder = builder.configure(config);
        }
        if let Some(initial) = &self.initial {
            builder = builder.initial(initial.clone());
        }
        Ok(builder.build()?)
    }
}
