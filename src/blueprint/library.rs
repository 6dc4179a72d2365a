//! Named guards and hooks that blueprints refer to.

use crate::core::{Guard, StateBehavior};
use std::collections::HashMap;
use std::sync::Arc;

/// Caller-supplied table binding blueprint names to code.
///
/// A blueprint is plain data; anything entity specific (perception checks,
/// animation triggers) lives here and is looked up by name when the
/// blueprint is compiled.
pub struct Library<C> {
    guards: HashMap<String, Guard<C>>,
    hooks: HashMap<String, Arc<dyn StateBehavior<C>>>,
}

impl<C> Library<C> {
    pub fn new() -> Self {
        Self {
            guards: HashMap::new(),
            hooks: HashMap::new(),
        }
    }

    /// Register a guard under `name`, replacing any previous one.
    pub fn guard(mut self, name: impl Into<String>, guard: Guard<C>) -> Self {
        self.guards.insert(name.into(), guard);
        self
    }

    /// Register lifecycle callbacks under `name`, replacing any previous ones.
    pub fn hooks<B>(mut self, name: impl Into<String>, behavior: B) -> Self
    where
        B: StateBehavior<C> + 'static,
    {
        self.hooks.insert(name.into(), Arc::new(behavior));
        self
    }

    pub fn get_guard(&self, name: &str) -> Option<&Guard<C>> {
        self.guards.get(name)
    }

    pub fn get_hooks(&self, name: &str) -> Option<&Arc<dyn StateBehavior<C>>> {
        self.hooks.get(name)
    }
}

impl<C> Default for Library<C> {
    fn default() -> Self {
        Self::new()
    }
}
