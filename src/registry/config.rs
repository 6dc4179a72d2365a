//! Declarative per-state configuration records.

use crate::core::{Guard, Hooks, State, StateBehavior, TransitionEdge};
use std::sync::Arc;

/// Configuration of one state: its lifecycle callbacks and outgoing edges.
///
/// Edges are evaluated in the order they are added here.
///
/// # Example
///
/// ```rust
/// use temperament::core::{Guard, Hooks};
/// use temperament::registry::StateConfig;
///
/// struct Npc {
///     found: bool,
///     barks: u32,
/// }
///
/// let seek = StateConfig::new("Seek")
///     .hooks(Hooks::new().enter(|n: &mut Npc| n.barks += 1))
///     .weighted(Guard::when(|n: &Npc| n.found), [("Attack", 0.2), ("Flee", 0.8)]);
///
/// assert_eq!(seek.edges().len(), 1);
/// ```
pub struct StateConfig<S, C> {
    pub(crate) state: S,
    pub(crate) behavior: Option<Arc<dyn StateBehavior<C>>>,
    pub(crate) edges: Vec<TransitionEdge<S, C>>,
}

impl<S: State, C: 'static> StateConfig<S, C> {
    /// Empty configuration for `state`.
    pub fn new(state: S) -> Self {
        Self {
            state,
            behavior: None,
            edges: Vec::new(),
        }
    }

    /// Attach lifecycle callbacks, replacing any set before.
    pub fn behavior<B>(mut self, behavior: B) -> Self
    where
        B: StateBehavior<C> + 'static,
    {
        self.behavior = Some(Arc::new(behavior));
        self
    }

    /// Attach callbacks shared with other states or machines.
    pub fn shared_behavior(mut self, behavior: Arc<dyn StateBehavior<C>>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Attach closure callbacks.
    pub fn hooks(self, hooks: Hooks<C>) -> Self {
        self.behavior(hooks)
    }

    /// Append an edge.
    pub fn edge(mut self, edge: TransitionEdge<S, C>) -> Self {
        self.edges.push(edge);
        self
    }

    /// Append an edge going to `target` whenever `guard` holds.
    pub fn goto(self, guard: Guard<C>, target: S) -> Self {
        self.edge(TransitionEdge::single(guard, target))
    }

    /// Append an edge choosing among weighted candidates.
    pub fn weighted<I>(self, guard: Guard<C>, candidates: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
    {
        self.edge(TransitionEdge::new(guard).candidates_from(candidates))
    }

    /// Append an edge that halts the machine whenever `guard` holds.
    pub fn halt_when(self, guard: Guard<C>) -> Self {
        self.edge(TransitionEdge::halt(guard))
    }
}

impl<S, C> StateConfig<S, C> {
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn edges(&self) -> &[TransitionEdge<S, C>] {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Inert;

    #[test]
    fn edges_keep_declaration_order() {
        let config: StateConfig<&str, ()> = StateConfig::new("Idle")
            .goto(Guard::after(1.0), "Seek")
            .weighted(Guard::always(), [("Attack", 1.0), ("Flee", 2.0)])
            .halt_when(Guard::never());

        let counts: Vec<_> = config.edges().iter().map(|e| e.candidates().len()).collect();
        assert_eq!(counts, vec![1, 2, 0]);
        assert_eq!(*config.state(), "Idle");
    }

    #[test]
    fn behavior_is_replaced_not_merged() {
        let config: StateConfig<&str, ()> = StateConfig::new("Idle")
            .hooks(Hooks::new())
            .behavior(Inert);

        assert!(config.behavior.is_some());
    }

    #[test]
    fn unconfigured_record_has_no_behavior() {
        let config: StateConfig<&str, ()> = StateConfig::new("Idle");
        assert!(config.behavior.is_none());
        assert!(config.edges().is_empty());
    }
}
