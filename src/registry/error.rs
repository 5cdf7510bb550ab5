//! Error types for applying transitions.

use thiserror::Error;

/// Errors raised while resolving or applying an action.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// No external reducer changed the state and no transition is registered.
    /// Only raised under the strict policy.
    #[error("Reducer not found for action '{action_type}'")]
    ReducerNotFound { action_type: String },

    /// A merge function returned something other than an object or null.
    #[error("Merge '{name}' returned a non-object value: {found}")]
    InvalidMergeResult { name: String, found: String },
}
