//! Transition edges and their weighted candidates.

use super::guard::Guard;
use super::state::State;
use serde::{Deserialize, Serialize};

/// A possible destination of an edge, with its relative weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate<S> {
    pub state: S,
    #[serde(default = "unit_weight")]
    pub weight: f64,
}

fn unit_weight() -> f64 {
    1.0
}

impl<S: State> Candidate<S> {
    pub fn new(state: S, weight: f64) -> Self {
        Self { state, weight }
    }
}

impl<S: State> From<(S, f64)> for Candidate<S> {
    fn from((state, weight): (S, f64)) -> Self {
        Self::new(state, weight)
    }
}

/// Guarded rule leaving a state.
///
/// When the guard holds, one of the candidates is picked with probability
/// proportional to its weight. An edge with no candidates halts the machine
/// when it fires; an edge with a single candidate always goes there.
///
/// # Example
///
/// ```rust
/// use temperament::core::{Guard, TransitionEdge};
///
/// struct Npc {
///     target_found: bool,
/// }
///
/// let engage = TransitionEdge::new(Guard::when(|n: &Npc| n.target_found))
///     .to("Attack", 0.2)
///     .to("Flee", 0.8);
///
/// assert_eq!(engage.candidates().len(), 2);
/// ```
pub struct TransitionEdge<S, C> {
    pub(crate) guard: Guard<C>,
    pub(crate) candidates: Vec<Candidate<S>>,
}

impl<S: State, C: 'static> TransitionEdge<S, C> {
    /// Edge with the given guard and, so far, no candidates.
    pub fn new(guard: Guard<C>) -> Self {
        Self {
            guard,
            candidates: Vec::new(),
        }
    }

    /// Edge that goes to `state` unconditionally when `guard` holds.
    pub fn single(guard: Guard<C>, state: S) -> Self {
        Self::new(guard).to(state, 1.0)
    }

    /// Edge that halts the machine when `guard` holds.
    pub fn halt(guard: Guard<C>) -> Self {
        Self::new(guard)
    }

    /// Append a weighted candidate. Declaration order is kept.
    pub fn to(mut self, state: S, weight: f64) -> Self {
        self.candidates.push(Candidate::new(state, weight));
        self
    }

    /// Append several weighted candidates.
    pub fn candidates_from<I, T>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Candidate<S>>,
    {
        self.candidates.extend(candidates.into_iter().map(Into::into));
        self
    }
}

impl<S, C> TransitionEdge<S, C> {
    pub fn guard(&self) -> &Guard<C> {
        &self.guard
    }

    pub fn candidates(&self) -> &[Candidate<S>] {
        &self.candidates
    }
}
