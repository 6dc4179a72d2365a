//! Authoring errors rejected when a registry is built.

use thiserror::Error;

/// A single authoring mistake found while validating a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("state '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("edge from '{from}' gives '{target}' negative weight {weight}")]
    NegativeWeight {
        from: String,
        target: String,
        weight: f64,
    },

    #[error("edge from '{from}' gives '{target}' non-finite weight {weight}")]
    NonFiniteWeight {
        from: String,
        target: String,
        weight: f64,
    },
}

/// Errors that prevent a registry from being built.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Every problem found in one validation pass.
    #[error("invalid state machine configuration: {}", render(.0))]
    Invalid(Vec<ConfigError>),

    #[error("initial state '{0}' is not declared")]
    UnknownInitialState(String),
}

impl BuildError {
    /// The individual problems behind an `Invalid` error.
    pub fn problems(&self) -> &[ConfigError] {
        match self {
            Self::Invalid(problems) => problems,
            Self::UnknownInitialState(_) => &[],
        }
    }
}

fn render(problems: &[ConfigError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
