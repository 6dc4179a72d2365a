//! State registry: the resolved, immutable configuration of a machine.
//!
//! Building a registry does two things. Authoring mistakes (duplicate state
//! names, negative or non-finite weights) are collected in one pass and
//! rejected together. Everything else is resolved once: state keys become
//! dense [`StateId`]s and every edge candidate is rewritten to an id, so a
//! tick never hashes a key.

mod config;
mod error;

pub use config::StateConfig;
pub use error::{BuildError, ConfigError};

use crate::core::{Guard, Inert, State, StateBehavior, StateId};
use crate::diagnostic::Diagnostic;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// An edge whose candidates have been resolved to ids.
pub(crate) struct ResolvedEdge<C> {
    pub(crate) guard: Guard<C>,
    pub(crate) candidates: Vec<(StateId, f64)>,
}

pub(crate) struct Slot<S, C> {
    pub(crate) key: S,
    pub(crate) behavior: Arc<dyn StateBehavior<C>>,
    pub(crate) edges: Vec<ResolvedEdge<C>>,
}

/// Every declared state with its callbacks and outgoing edges.
///
/// # Example
///
/// ```rust
/// use temperament::core::Guard;
/// use temperament::registry::{StateConfig, StateRegistry};
///
/// let registry = StateRegistry::<&str, ()>::build(
///     ["Idle", "Seek", "Attack"],
///     vec![StateConfig::new("Idle").goto(Guard::after(1.0), "Seek")],
/// )
/// .unwrap();
///
/// // Unconfigured states still exist, so edges may target them.
/// assert_eq!(registry.len(), 3);
/// assert!(registry.contains(&"Attack"));
/// ```
pub struct StateRegistry<S, C> {
    slots: Vec<Slot<S, C>>,
    index: HashMap<S, StateId>,
}

impl<S: State, C: 'static> StateRegistry<S, C> {
    /// Build a registry from the full list of state names and the per-state
    /// configuration records.
    ///
    /// Fails on duplicate names and on negative or non-finite weights.
    /// Records naming an undeclared state, and edges targeting one, are
    /// skipped with a diagnostic.
    pub fn build<N>(names: N, configs: Vec<StateConfig<S, C>>) -> Result<Self, BuildError>
    where
        N: IntoIterator<Item = S>,
    {
        let names: Vec<S> = names.into_iter().collect();
        validate(&names, &configs)?;

        let inert: Arc<dyn StateBehavior<C>> = Arc::new(Inert);
        let mut index = HashMap::with_capacity(names.len());
        let mut slots = Vec::with_capacity(names.len());
        for (i, key) in names.into_iter().enumerate() {
            index.insert(key.clone(), StateId(i));
            slots.push(Slot {
                key,
                behavior: Arc::clone(&inert),
                edges: Vec::new(),
            });
        }

        let mut configured = vec![false; slots.len()];
        for config in configs {
            let Some(&id) = index.get(&config.state) else {
                Diagnostic::UnknownConfigState {
                    state: config.state.name().to_string(),
                }
                .emit();
                continue;
            };

            if configured[id.0] {
                Diagnostic::DuplicateConfig {
                    state: config.state.name().to_string(),
                }
                .emit();
            }
            configured[id.0] = true;

            let edges = config
                .edges
                .into_iter()
                .filter_map(|edge| {
                    let mut candidates = Vec::with_capacity(edge.candidates.len());
                    for candidate in &edge.candidates {
                        match index.get(&candidate.state) {
                            Some(&target) => candidates.push((target, candidate.weight)),
                            None => {
                                Diagnostic::UnknownEdgeTarget {
                                    from: config.state.name().to_string(),
                                    target: candidate.state.name().to_string(),
                                }
                                .emit();
                                return None;
                            }
                        }
                    }
                    Some(ResolvedEdge {
                        guard: edge.guard,
                        candidates,
                    })
                })
                .collect();

            let slot = &mut slots[id.0];
            slot.behavior = config.behavior.unwrap_or_else(|| Arc::clone(&inert));
            slot.edges = edges;
        }

        Ok(Self { slots, index })
    }
}

impl<S: State, C> StateRegistry<S, C> {
    /// Id of a declared state.
    pub fn id_of(&self, state: &S) -> Option<StateId> {
        self.index.get(state).copied()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    /// Key of the state behind `id`, or `None` if `id` does not belong to
    /// this registry (for instance one kept across a reconfigure).
    pub fn state(&self, id: StateId) -> Option<&S> {
        self.slots.get(id.0).map(|slot| &slot.key)
    }

    /// Number of outgoing edges of a state.
    pub fn edge_count(&self, id: StateId) -> Option<usize> {
        self.slots.get(id.0).map(|slot| slot.edges.len())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &S)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (StateId(i), &slot.key))
    }

    pub(crate) fn slot(&self, id: StateId) -> &Slot<S, C> {
        &self.slots[id.0]
    }
}

fn validate<S: State, C>(names: &[S], configs: &[StateConfig<S, C>]) -> Result<(), BuildError> {
    let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        let check = if !seen.insert(name) {
            Validation::fail(ConfigError::DuplicateState {
                state: name.name().to_string(),
            })
        } else {
            Validation::success(())
        };
        checks.push(check);
    }

    for config in configs {
        for edge in &config.edges {
            for candidate in &edge.candidates {
                checks.push(check_weight(
                    config.state.name(),
                    candidate.state.name(),
                    candidate.weight,
                ));
            }
        }
    }

    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(BuildError::Invalid(errors.iter().cloned().collect())),
    }
}

fn check_weight(from: &str, target: &str, weight: f64) -> Validation<(), NonEmptyVec<ConfigError>> {
    if !weight.is_finite() {
        Validation::fail(ConfigError::NonFiniteWeight {
            from: from.to_string(),
            target: target.to_string(),
            weight,
        })
    } else if weight < 0.0 {
        Validation::fail(ConfigError::NegativeWeight {
            from: from.to_string(),
            target: target.to_string(),
            weight,
        })
    } else {
        Validation::success(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Hooks;

    #[derive(Default)]
    struct Npc {
        entered: u32,
    }

    fn names() -> [&'static str; 4] {
        ["Idle", "Seek", "Attack", "Flee"]
    }

    #[test]
    fn every_name_gets_a_slot() {
        let registry = StateRegistry::<&str, Npc>::build(names(), Vec::new()).unwrap();

        assert_eq!(registry.len(), 4);
        for (i, name) in names().iter().enumerate() {
            assert_eq!(registry.id_of(name), Some(StateId(i)));
            assert_eq!(registry.state(StateId(i)), Some(name));
        }
    }

    #[test]
    fn edges_resolve_to_ids() {
        let registry = StateRegistry::<&str, Npc>::build(
            names(),
            vec![StateConfig::new("Seek")
                .weighted(Guard::always(), [("Attack", 0.2), ("Flee", 0.8)])],
        )
        .unwrap();

        let seek = registry.slot(StateId(1));
        assert_eq!(seek.edges.len(), 1);
        assert_eq!(seek.edges[0].candidates, vec![(StateId(2), 0.2), (StateId(3), 0.8)]);
    }

    #[test]
    fn callbacks_attach_to_their_state() {
        let registry = StateRegistry::<&str, Npc>::build(
            names(),
            vec![StateConfig::new("Flee").hooks(Hooks::new().enter(|n: &mut Npc| n.entered += 1))],
        )
        .unwrap();
        let mut npc = Npc::default();

        registry.slot(StateId(0)).behavior.on_enter(&mut npc);
        assert_eq!(npc.entered, 0);

        registry.slot(StateId(3)).behavior.on_enter(&mut npc);
        assert_eq!(npc.entered, 1);
    }

    #[test]
    fn unknown_config_state_is_skipped() {
        let registry = StateRegistry::<&str, Npc>::build(
            names(),
            vec![
                StateConfig::new("Dance").goto(Guard::always(), "Idle"),
                StateConfig::new("Idle").goto(Guard::always(), "Seek"),
            ],
        )
        .unwrap();

        assert!(!registry.contains(&"Dance"));
        assert_eq!(registry.edge_count(StateId(0)), Some(1));
    }

    #[test]
    fn edge_to_unknown_target_is_dropped() {
        let registry = StateRegistry::<&str, Npc>::build(
            names(),
            vec![StateConfig::new("Idle")
                .goto(Guard::always(), "Dance")
                .goto(Guard::always(), "Seek")],
        )
        .unwrap();

        let idle = registry.slot(StateId(0));
        assert_eq!(idle.edges.len(), 1);
        assert_eq!(idle.edges[0].candidates, vec![(StateId(1), 1.0)]);
    }

    #[test]
    fn later_record_replaces_earlier_one() {
        let registry = StateRegistry::<&str, Npc>::build(
            names(),
            vec![
                StateConfig::new("Idle")
                    .goto(Guard::always(), "Seek")
                    .goto(Guard::always(), "Flee"),
                StateConfig::new("Idle").goto(Guard::always(), "Attack"),
            ],
        )
        .unwrap();

        let idle = registry.slot(StateId(0));
        assert_eq!(idle.edges.len(), 1);
        assert_eq!(idle.edges[0].candidates[0].0, StateId(2));
    }

    #[test]
    fn duplicate_names_fail_fast() {
        let result = StateRegistry::<&str, Npc>::build(["Idle", "Seek", "Idle"], Vec::new());

        let err = result.err().unwrap();
        assert_eq!(
            err.problems(),
            &[ConfigError::DuplicateState {
                state: "Idle".to_string()
            }]
        );
    }

    #[test]
    fn all_weight_problems_are_reported_together() {
        let result = StateRegistry::<&str, Npc>::build(
            ["Idle", "Idle", "Seek"],
            vec![StateConfig::new("Idle")
                .weighted(Guard::always(), [("Seek", -1.0), ("Idle", f64::NAN)])],
        );

        let err = result.err().unwrap();
        assert_eq!(err.problems().len(), 3);
        assert!(err
            .problems()
            .iter()
            .any(|p| matches!(p, ConfigError::NegativeWeight { weight, .. } if *weight == -1.0)));
        assert!(err
            .problems()
            .iter()
            .any(|p| matches!(p, ConfigError::NonFiniteWeight { .. })));
    }

    #[test]
    fn zero_weights_are_accepted_at_build_time() {
        let registry = StateRegistry::<&str, Npc>::build(
            names(),
            vec![StateConfig::new("Seek")
                .weighted(Guard::always(), [("Attack", 0.0), ("Flee", 0.0)])],
        );

        assert!(registry.is_ok());
    }

    #[test]
    fn foreign_ids_are_not_resolved() {
        let big = StateRegistry::<&str, Npc>::build(names(), Vec::new()).unwrap();
        let small = StateRegistry::<&str, Npc>::build(["Idle"], Vec::new()).unwrap();
        let (flee, _) = big.states().last().unwrap();

        assert_eq!(small.state(flee), None);
        assert_eq!(small.edge_count(flee), None);
        assert_eq!(small.state(StateId(0)), Some(&"Idle"));
    }

    #[test]
    fn states_iterate_in_declaration_order() {
        let registry = StateRegistry::<&str, Npc>::build(names(), Vec::new()).unwrap();
        let order: Vec<_> = registry.states().map(|(_, s)| *s).collect();

        assert_eq!(order, names().to_vec());
    }
}
