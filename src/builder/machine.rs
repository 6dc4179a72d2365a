//! Builder for constructing state machines.

use crate::core::State;
use crate::machine::{MachineOptions, StateMachine};
use crate::registry::{BuildError, StateConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```
/// use temperament::builder::MachineBuilder;
/// use temperament::core::Guard;
/// use temperament::registry::StateConfig;
///
/// let machine = MachineBuilder::<&str, ()>::new()
///     .states(["Idle", "Seek"])
///     .configure(StateConfig::new("Idle").goto(Guard::after(2.0), "Seek"))
///     .initial("Idle")
///     .seed(7)
///     .debug(true)
///     .build()
///     .unwrap();
///
/// assert!(!machine.is_active());
/// assert_eq!(machine.registry().len(), 2);
/// ```
pub struct MachineBuilder<S, C, R = StdRng> {
    names: Vec<S>,
    configs: Vec<StateConfig<S, C>>,
    initial: Option<S>,
    options: MachineOptions,
    rng: R,
}

impl<S: State, C: 'static> MachineBuilder<S, C, StdRng> {
    /// Create a new builder with an OS-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Use a deterministic random source seeded with `seed`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl<S: State, C: 'static, R: Rng> MachineBuilder<S, C, R> {
    /// Create a new builder around an injected random source.
    pub fn with_rng(rng: R) -> Self {
        Self {
            names: Vec::new(),
            configs: Vec::new(),
            initial: None,
            options: MachineOptions::default(),
            rng,
        }
    }

    /// Declare a state.
    pub fn state(mut self, name: S) -> Self {
        self.names.push(name);
        self
    }

    /// Declare several states, in order.
    pub fn states<I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.names.extend(names);
        self
    }

    /// Add a configuration record.
    pub fn configure(mut self, config: StateConfig<S, C>) -> Self {
        self.configs.push(config);
        self
    }

    /// Set the state [`StateMachine::start`] enters. Defaults to the first
    /// declared state.
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Toggle `State: X -> Y` transition traces.
    pub fn debug(mut self, debug: bool) -> Self {
        self.options.debug = debug;
        self
    }

    pub fn options(mut self, options: MachineOptions) -> Self {
        self.options = options;
        self
    }

    /// Swap in another random source.
    pub fn rng<R2: Rng>(self, rng: R2) -> MachineBuilder<S, C, R2> {
        MachineBuilder {
            names: self.names,
            configs: self.configs,
            initial: self.initial,
            options: self.options,
            rng,
        }
    }

    /// Build the state machine.
    /// Returns an error if the configuration is invalid or the initial state
    /// is not declared.
    pub fn build(self) -> Result<StateMachine<S, C, R>, BuildError> {
        let mut machine =
            StateMachine::with_rng(self.names, self.configs, self.rng)?.with_options(self.options);
        if let Some(initial) = &self.initial {
            machine.set_initial(initial)?;
        }
        Ok(machine)
    }
}

impl<S: State, C: 'static> Default for MachineBuilder<S, C, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}
