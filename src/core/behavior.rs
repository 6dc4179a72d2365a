//! Lifecycle callbacks attached to a state.
//!
//! The machine calls into a state through [`StateBehavior`]: once on entry,
//! once per tick while the state is current, and once on exit. The entity
//! data the callbacks work on is passed in explicitly as the context `C`.

use std::fmt;
use std::sync::Arc;

/// Enter/update/exit hooks of one state.
///
/// Every method defaults to a no-op, so an implementation only overrides
/// the hooks it needs.
///
/// # Example
///
/// ```rust
/// use temperament::core::StateBehavior;
///
/// struct Sentry {
///     alert: bool,
///     patrol_distance: f64,
/// }
///
/// struct Patrol;
///
/// impl StateBehavior<Sentry> for Patrol {
///     fn on_enter(&self, ctx: &mut Sentry) {
///         ctx.alert = false;
///     }
///
///     fn on_update(&self, ctx: &mut Sentry, dt: f64) {
///         ctx.patrol_distance += 1.5 * dt;
///     }
/// }
///
/// let mut sentry = Sentry { alert: true, patrol_distance: 0.0 };
/// Patrol.on_enter(&mut sentry);
/// Patrol.on_update(&mut sentry, 2.0);
/// Patrol.on_exit(&mut sentry);
///
/// assert!(!sentry.alert);
/// assert_eq!(sentry.patrol_distance, 3.0);
/// ```
pub trait StateBehavior<C>: Send + Sync {
    /// Called when the machine enters the state.
    fn on_enter(&self, _ctx: &mut C) {}

    /// Called once per tick while the state is current, before any edge is
    /// evaluated.
    fn on_update(&self, _ctx: &mut C, _dt: f64) {}

    /// Called when the machine leaves the state, or halts while in it.
    fn on_exit(&self, _ctx: &mut C) {}
}

impl<C, B: StateBehavior<C> + ?Sized> StateBehavior<C> for Arc<B> {
    #[inline]
    fn on_enter(&self, ctx: &mut C) {
        (**self).on_enter(ctx)
    }

    #[inline]
    fn on_update(&self, ctx: &mut C, dt: f64) {
        (**self).on_update(ctx, dt)
    }

    #[inline]
    fn on_exit(&self, ctx: &mut C) {
        (**self).on_exit(ctx)
    }
}

impl<C, B: StateBehavior<C> + ?Sized> StateBehavior<C> for Box<B> {
    #[inline]
    fn on_enter(&self, ctx: &mut C) {
        (**self).on_enter(ctx)
    }

    #[inline]
    fn on_update(&self, ctx: &mut C, dt: f64) {
        (**self).on_update(ctx, dt)
    }

    #[inline]
    fn on_exit(&self, ctx: &mut C) {
        (**self).on_exit(ctx)
    }
}

type EnterFn<C> = Box<dyn Fn(&mut C) + Send + Sync>;
type UpdateFn<C> = Box<dyn Fn(&mut C, f64) + Send + Sync>;

/// Closure-backed [`StateBehavior`].
///
/// Each hook is optional; a missing hook does nothing.
pub struct Hooks<C> {
    enter: Option<EnterFn<C>>,
    update: Option<UpdateFn<C>>,
    exit: Option<EnterFn<C>>,
}

impl<C> Hooks<C> {
    /// Hooks that do nothing.
    pub fn new() -> Self {
        Self {
            enter: None,
            update: None,
            exit: None,
        }
    }

    /// Set the enter hook.
    pub fn enter<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.enter = Some(Box::new(f));
        self
    }

    /// Set the per-tick update hook.
    pub fn update<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut C, f64) + Send + Sync + 'static,
    {
        self.update = Some(Box::new(f));
        self
    }

    /// Set the exit hook.
    pub fn exit<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.exit = Some(Box::new(f));
        self
    }
}

impl<C> Default for Hooks<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> StateBehavior<C> for Hooks<C> {
    fn on_enter(&self, ctx: &mut C) {
        if let Some(f) = &self.enter {
            f(ctx);
        }
    }

    fn on_update(&self, ctx: &mut C, dt: f64) {
        if let Some(f) = &self.update {
            f(ctx, dt);
        }
    }

    fn on_exit(&self, ctx: &mut C) {
        if let Some(f) = &self.exit {
            f(ctx);
        }
    }
}

impl<C> fmt::Debug for Hooks<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("enter", &self.enter.is_some())
            .field("update", &self.update.is_some())
            .field("exit", &self.exit.is_some())
            .finish()
    }
}

/// Behavior of a state that was declared but never configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inert;

impl<C> StateBehavior<C> for Inert {}
