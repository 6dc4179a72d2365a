//! Guard predicates for transition edges.
//!
//! A guard decides, once per tick, whether its edge fires. It sees the
//! entity context and the time spent in the current state, nothing else.

use std::fmt;
use std::sync::Arc;

type Predicate<C> = dyn Fn(&C, f64) -> bool + Send + Sync;

/// Predicate that decides whether a transition edge fires this tick.
///
/// The second argument is the machine's time in the current state, in
/// seconds, already advanced by the current tick. Guards are cheap to clone;
/// clones share the same predicate.
///
/// # Example
///
/// ```rust
/// use temperament::core::Guard;
///
/// struct Grunt {
///     hp: u32,
/// }
///
/// let wounded = Guard::when(|g: &Grunt| g.hp < 20);
/// let bored = Guard::<Grunt>::after(3.0);
///
/// assert!(wounded.check(&Grunt { hp: 5 }, 0.0));
/// assert!(!bored.check(&Grunt { hp: 5 }, 1.5));
/// assert!(wounded.or(bored).check(&Grunt { hp: 50 }, 3.0));
/// ```
pub struct Guard<C> {
    predicate: Arc<Predicate<C>>,
}

impl<C: 'static> Guard<C> {
    /// Create a guard from a predicate over the context and time in state.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C, f64) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard over the context only.
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self::new(move |ctx, _| predicate(ctx))
    }

    /// Guard that holds once the machine has spent `seconds` in the state.
    pub fn after(seconds: f64) -> Self {
        Self::new(move |_, elapsed| elapsed >= seconds)
    }

    /// Guard that always holds.
    pub fn always() -> Self {
        Self::new(|_, _| true)
    }

    /// Guard that never holds.
    pub fn never() -> Self {
        Self::new(|_, _| false)
    }

    /// Holds when both guards hold. `other` is not evaluated if `self` fails.
    pub fn and(self, other: Guard<C>) -> Self {
        Self::new(move |ctx, elapsed| self.check(ctx, elapsed) && other.check(ctx, elapsed))
    }

    /// Holds when either guard holds. `other` is not evaluated if `self` holds.
    pub fn or(self, other: Guard<C>) -> Self {
        Self::new(move |ctx, elapsed| self.check(ctx, elapsed) || other.check(ctx, elapsed))
    }

    /// Holds when `self` does not.
    pub fn negate(self) -> Self {
        Self::new(move |ctx, elapsed| !self.check(ctx, elapsed))
    }
}

impl<C> Guard<C> {
    /// Evaluate the guard.
    pub fn check(&self, ctx: &C, elapsed: f64) -> bool {
        (self.predicate)(ctx, elapsed)
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Npc {
        found: bool,
    }

    #[test]
    fn when_ignores_elapsed() {
        let guard = Guard::when(|n: &Npc| n.found);

        assert!(guard.check(&Npc { found: true }, 0.0));
        assert!(!guard.check(&Npc { found: false }, 100.0));
    }

    #[test]
    fn after_is_inclusive() {
        let guard = Guard::<Npc>::after(1.0);

        assert!(!guard.check(&Npc { found: false }, 0.999));
        assert!(guard.check(&Npc { found: false }, 1.0));
        assert!(guard.check(&Npc { found: false }, 7.5));
    }

    #[test]
    fn constant_guards() {
        let npc = Npc { found: false };
        assert!(Guard::<Npc>::always().check(&npc, 0.0));
        assert!(!Guard::<Npc>::never().check(&npc, 0.0));
    }

    #[test]
    fn combinators() {
        let found = Guard::when(|n: &Npc| n.found);
        let late = Guard::<Npc>::after(2.0);

        let both = found.clone().and(late.clone());
        assert!(!both.check(&Npc { found: true }, 1.0));
        assert!(both.check(&Npc { found: true }, 2.0));

        let either = found.clone().or(late);
        assert!(either.check(&Npc { found: false }, 2.0));
        assert!(!either.check(&Npc { found: false }, 0.5));

        let lost = found.negate();
        assert!(lost.check(&Npc { found: false }, 0.0));
    }

    #[test]
    fn and_short_circuits() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let counting = Guard::new(|_: &Npc, _| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            true
        });
        let guard = Guard::<Npc>::never().and(counting);

        assert!(!guard.check(&Npc { found: true }, 0.0));
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn clones_share_predicate() {
        let guard = Guard::when(|n: &Npc| n.found);
        let cloned = guard.clone();

        assert_eq!(
            guard.check(&Npc { found: true }, 0.0),
            cloned.check(&Npc { found: true }, 0.0)
        );
    }
}
