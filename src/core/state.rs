//! State keys and dense state handles.
//!
//! A state key identifies a behavior state by name (an enum variant or a
//! string). Inside a machine every key is mapped once to a [`StateId`], a
//! small integer that indexes the registry directly.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for keys naming the states of a machine.
///
/// # Required Traits
///
/// - `Clone`: keys are copied into the registry and into step reports
/// - `Eq` + `Hash`: keys are looked up once, at configuration time
/// - `Debug`: keys appear in diagnostics
/// - `Send`: a machine may be moved to (and pinned on) a worker thread
///
/// # Example
///
/// ```rust
/// use temperament::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Mood {
///     Calm,
///     Angry,
/// }
///
/// impl State for Mood {
///     fn name(&self) -> &str {
///         match self {
///             Self::Calm => "Calm",
///             Self::Angry => "Angry",
///         }
///     }
/// }
///
/// assert_eq!(Mood::Angry.name(), "Angry");
/// assert_eq!("Calm".name(), "Calm");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + 'static {
    /// Human readable name used in transition traces and diagnostics.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl State for &'static str {
    fn name(&self) -> &str {
        self
    }
}

/// Dense handle to a state inside one registry.
///
/// Ids are assigned in declaration order when the registry is built and are
/// only meaningful for the registry that produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Position of the state in the declared name list.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Idle,
        Seek,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Seek => "Seek",
            }
        }
    }

    #[test]
    fn enum_state_names() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::Seek.name(), "Seek");
    }

    #[test]
    fn string_keys_name_themselves() {
        let owned = String::from("Flee");
        assert_eq!(owned.name(), "Flee");
        assert_eq!("Attack".name(), "Attack");
    }

    #[test]
    fn state_id_exposes_index() {
        let id = StateId(3);
        assert_eq!(id.index(), 3);
        assert_eq!(id.to_string(), "#3");
    }

    #[test]
    fn state_ids_order_by_declaration() {
        assert!(StateId(0) < StateId(1));
    }
}
