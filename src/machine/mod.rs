//! The tick-driven state machine.
//!
//! A [`StateMachine`] owns a [`StateRegistry`], the id of the active state,
//! the time spent in it, and the random source used to resolve weighted
//! edges. An entity drives it by calling [`StateMachine::update`] once per
//! frame and may force a transition at any time with
//! [`StateMachine::change_state`].
//!
//! # Tick order
//!
//! 1. the timer advances by `dt`
//! 2. the current state's `on_update` runs
//! 3. edges are checked in declaration order; the first whose guard holds
//!    is resolved and the machine transitions, ending the tick
//!
//! At most one transition happens per tick.

pub mod weighted;

use crate::core::{State, StateId};
use crate::diagnostic::Diagnostic;
use crate::registry::{BuildError, StateConfig, StateRegistry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use weighted::Resolution;

/// Construction-time switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    /// Emit a `State: X -> Y` trace at debug level on every transition.
    pub debug: bool,
}

/// Lifecycle of the machine itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Built, never entered a state.
    Uninitialized,
    /// Running in the given state.
    Active(StateId),
    /// Inside `change_state`, between leaving one state and entering the next.
    Transitioning,
    /// Stopped by a halting edge or by [`StateMachine::halt`]. Resumed only by
    /// an explicit `change_state`.
    Halted,
}

impl Status {
    pub fn current(self) -> Option<StateId> {
        match self {
            Self::Active(id) => Some(id),
            _ => None,
        }
    }
}

/// What a call to [`StateMachine::update`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum Step<S> {
    /// The machine is not active; nothing ran.
    Inactive,
    /// The state's update ran and the machine stayed where it was.
    Remained,
    /// An edge fired and the machine moved.
    Transitioned { from: S, to: S },
    /// An edge fired that halted the machine.
    Halted { from: S },
}

/// What a call to [`StateMachine::change_state`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum Change<S> {
    /// Left `from` (if any) and entered `to`.
    Entered { from: Option<S>, to: S },
    /// Already in the requested state; no callbacks ran.
    Unchanged,
    /// The requested state is not declared; nothing changed.
    Unknown,
}

/// Weighted probabilistic finite-state machine.
///
/// `S` names the states, `C` is the entity context handed to callbacks and
/// guards, and `R` is the random source used for weighted edges.
///
/// # Example
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use temperament::core::Guard;
/// use temperament::machine::{StateMachine, Step};
/// use temperament::registry::StateConfig;
///
/// #[derive(Default)]
/// struct Npc {
///     found: bool,
/// }
///
/// let mut machine = StateMachine::with_rng(
///     ["Idle", "Seek", "Attack", "Flee"],
///     vec![
///         StateConfig::new("Idle").goto(Guard::after(1.0), "Seek"),
///         StateConfig::new("Seek")
///             .weighted(Guard::when(|n: &Npc| n.found), [("Attack", 0.2), ("Flee", 0.8)]),
///     ],
///     StdRng::seed_from_u64(42),
/// )
/// .unwrap();
///
/// let mut npc = Npc::default();
/// machine.change_state(&mut npc, &"Idle");
///
/// assert_eq!(machine.update(&mut npc, 0.5), Step::Remained);
/// assert_eq!(
///     machine.update(&mut npc, 0.5),
///     Step::Transitioned { from: "Idle", to: "Seek" }
/// );
/// assert_eq!(machine.elapsed(), 0.0);
///
/// npc.found = true;
/// machine.update(&mut npc, 0.1);
/// assert!(matches!(machine.current(), Some(&"Attack") | Some(&"Flee")));
/// ```
pub struct StateMachine<S, C, R = StdRng> {
    registry: StateRegistry<S, C>,
    status: Status,
    elapsed: f64,
    initial: Option<StateId>,
    rng: R,
    options: MachineOptions,
}

impl<S: State, C: 'static> StateMachine<S, C, StdRng> {
    /// Build a machine whose random source is seeded from the OS.
    pub fn new<N>(names: N, configs: Vec<StateConfig<S, C>>) -> Result<Self, BuildError>
    where
        N: IntoIterator<Item = S>,
    {
        Self::with_rng(names, configs, StdRng::from_entropy())
    }
}

impl<S: State, C: 'static, R: Rng> StateMachine<S, C, R> {
    /// Build a machine around an injected random source.
    pub fn with_rng<N>(
        names: N,
        configs: Vec<StateConfig<S, C>>,
        rng: R,
    ) -> Result<Self, BuildError>
    where
        N: IntoIterator<Item = S>,
    {
        let registry = StateRegistry::build(names, configs)?;
        Ok(Self::from_registry(registry, rng))
    }

    /// Wrap an already built registry.
    ///
    /// The first declared state becomes the state [`start`](Self::start)
    /// enters.
    pub fn from_registry(registry: StateRegistry<S, C>, rng: R) -> Self {
        let initial = (!registry.is_empty()).then_some(StateId(0));
        Self {
            registry,
            status: Status::Uninitialized,
            elapsed: 0.0,
            initial,
            rng,
            options: MachineOptions::default(),
        }
    }

    /// Replace the whole configuration.
    ///
    /// On success the machine is back to [`Status::Uninitialized`]; no exit
    /// callback of the old configuration runs. On failure the old
    /// configuration stays in place.
    pub fn reconfigure<N>(
        &mut self,
        names: N,
        configs: Vec<StateConfig<S, C>>,
    ) -> Result<(), BuildError>
    where
        N: IntoIterator<Item = S>,
    {
        let registry = StateRegistry::build(names, configs)?;
        self.initial = (!registry.is_empty()).then_some(StateId(0));
        self.registry = registry;
        self.status = Status::Uninitialized;
        self.elapsed = 0.0;
        Ok(())
    }
}

impl<S: State, C, R: Rng> StateMachine<S, C, R> {
    pub fn with_options(mut self, options: MachineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the state [`start`](Self::start) enters.
    pub fn set_initial(&mut self, state: &S) -> Result<(), BuildError> {
        let id = self
            .registry
            .id_of(state)
            .ok_or_else(|| BuildError::UnknownInitialState(state.name().to_string()))?;
        self.initial = Some(id);
        Ok(())
    }

    /// Enter the initial state.
    pub fn start(&mut self, ctx: &mut C) -> Change<S> {
        match self.initial {
            Some(id) => self.change_to(ctx, id),
            None => {
                Diagnostic::NoInitialState.emit();
                Change::Unknown
            }
        }
    }

    /// Switch to `state`, running the old state's exit and the new state's
    /// enter callbacks.
    ///
    /// Asking for the state the machine is already in does nothing: no
    /// callbacks run and the timer keeps counting. Asking for an undeclared
    /// state emits a diagnostic and leaves the machine untouched. Works from
    /// any status, so it also starts and resumes the machine.
    pub fn change_state(&mut self, ctx: &mut C, state: &S) -> Change<S> {
        match self.registry.id_of(state) {
            Some(id) => self.change_to(ctx, id),
            None => {
                Diagnostic::UnknownTarget {
                    state: state.name().to_string(),
                }
                .emit();
                Change::Unknown
            }
        }
    }

    /// Advance the machine by one tick of `dt` seconds.
    ///
    /// Does nothing unless the machine is active. Configuration problems met
    /// during the tick are logged and degrade the machine, they never
    /// propagate.
    pub fn update(&mut self, ctx: &mut C, dt: f64) -> Step<S> {
        let Status::Active(current) = self.status else {
            return Step::Inactive;
        };
        if !dt.is_finite() || dt < 0.0 {
            Diagnostic::InvalidDelta { dt }.emit();
            return Step::Remained;
        }

        self.elapsed += dt;
        let slot = self.registry.slot(current);
        slot.behavior.on_update(ctx, dt);

        let elapsed = self.elapsed;
        let view: &C = ctx;
        let Some((index, edge)) = slot
            .edges
            .iter()
            .enumerate()
            .find(|(_, edge)| edge.guard.check(view, elapsed))
        else {
            return Step::Remained;
        };
        tracing::trace!(state = slot.key.name(), edge = index, elapsed, "guard fired");

        let candidates = edge.candidates.len();
        let resolution = weighted::resolve(&edge.candidates, &mut self.rng);
        let from = slot.key.clone();

        match resolution {
            Resolution::Target(to) => {
                if self.enter(ctx, to) {
                    Step::Transitioned {
                        from,
                        to: self.registry.slot(to).key.clone(),
                    }
                } else {
                    Step::Remained
                }
            }
            Resolution::Halt => {
                self.stop(ctx);
                Step::Halted { from }
            }
            Resolution::ZeroWeight => {
                Diagnostic::ZeroTotalWeight {
                    from: from.name().to_string(),
                    candidates,
                }
                .emit();
                self.stop(ctx);
                Step::Halted { from }
            }
        }
    }

    /// Stop the machine, running the current state's exit callback.
    pub fn halt(&mut self, ctx: &mut C) {
        self.stop(ctx);
    }

    /// Key of the active state, if any.
    pub fn current(&self) -> Option<&S> {
        self.status.current().map(|id| &self.registry.slot(id).key)
    }

    pub fn current_id(&self) -> Option<StateId> {
        self.status.current()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Seconds spent in the current state.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, Status::Active(_))
    }

    pub fn registry(&self) -> &StateRegistry<S, C> {
        &self.registry
    }

    pub fn options(&self) -> MachineOptions {
        self.options
    }

    fn change_to(&mut self, ctx: &mut C, id: StateId) -> Change<S> {
        let from = self.current().cloned();
        if self.enter(ctx, id) {
            Change::Entered {
                from,
                to: self.registry.slot(id).key.clone(),
            }
        } else {
            Change::Unchanged
        }
    }

    /// Returns false when `id` is already the active state.
    fn enter(&mut self, ctx: &mut C, id: StateId) -> bool {
        let from = self.status.current();
        if from == Some(id) {
            return false;
        }

        self.status = Status::Transitioning;
        if let Some(prev) = from {
            self.registry.slot(prev).behavior.on_exit(ctx);
        }
        self.registry.slot(id).behavior.on_enter(ctx);
        self.elapsed = 0.0;
        self.status = Status::Active(id);
        self.trace(from, Some(id));
        true
    }

    fn stop(&mut self, ctx: &mut C) {
        let from = self.status.current();
        self.status = Status::Transitioning;
        if let Some(prev) = from {
            self.registry.slot(prev).behavior.on_exit(ctx);
        }
        self.elapsed = 0.0;
        self.status = Status::Halted;
        self.trace(from, None);
    }

    fn trace(&self, from: Option<StateId>, to: Option<StateId>) {
        if !self.options.debug {
            return;
        }
        let name = |id: Option<StateId>| id.map_or("None", |id| self.registry.slot(id).key.name());
        tracing::debug!("State: {} -> {}", name(from), name(to));
    }
}
