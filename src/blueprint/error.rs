//! Blueprint error types.

use crate::registry::BuildError;
use thiserror::Error;

/// Errors that can occur while loading or compiling a blueprint
#[derive(Debug, Error)]
pub enum BlueprintError {
    /// The blueprint text is not valid JSON for the expected schema
    #[error("failed to parse blueprint: {0}")]
    Parse(#[from] serde_json::Error),

    /// A named guard is missing from the library
    #[error("guard '{0}' is not in the library")]
    UnknownGuard(String),

    /// A named set of hooks is missing from the library
    #[error("hooks '{0}' are not in the library")]
    UnknownHooks(String),

    /// The compiled configuration was rejected
    #[error(transparent)]
    Build(#[from] BuildError),
}
