//! Non-fatal configuration diagnostics.
//!
//! A misconfigured machine must not take the simulation down with it, so
//! these conditions are reported through `tracing` and the machine degrades
//! (skips a record, keeps its state, or halts) instead of returning an error.

use thiserror::Error;

/// A recoverable configuration problem detected while building or running a
/// machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Diagnostic {
    #[error("configuration for unknown state '{state}' skipped")]
    UnknownConfigState { state: String },

    #[error("edge from '{from}' targets unknown state '{target}', edge dropped")]
    UnknownEdgeTarget { from: String, target: String },

    #[error("state '{state}' configured more than once, last configuration wins")]
    DuplicateConfig { state: String },

    #[error("cannot change to unknown state '{state}'")]
    UnknownTarget { state: String },

    #[error("cannot start a machine with no states")]
    NoInitialState,

    #[error("edge from '{from}' has zero total weight over {candidates} candidates, halting")]
    ZeroTotalWeight { from: String, candidates: usize },

    #[error("ignoring tick with invalid delta time {dt}")]
    InvalidDelta { dt: f64 },
}

impl Diagnostic {
    /// Short stable identifier, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownConfigState { .. } => "unknown_config_state",
            Self::UnknownEdgeTarget { .. } => "unknown_edge_target",
            Self::DuplicateConfig { .. } => "duplicate_config",
            Self::UnknownTarget { .. } => "unknown_target",
            Self::NoInitialState => "no_initial_state",
            Self::ZeroTotalWeight { .. } => "zero_total_weight",
            Self::InvalidDelta { .. } => "invalid_delta",
        }
    }

    pub(crate) fn emit(&self) {
        tracing::warn!(diagnostic = self.kind(), "{}", self);
    }
}
