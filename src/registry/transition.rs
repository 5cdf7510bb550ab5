//! Transition descriptors stored in the registry.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::error::DispatchError;
use crate::state::{set_path, shallow_merge};

/// Computes a partial state from an incoming payload and the pre-update state.
///
/// The returned object is shallow-merged over a copy of the state.
pub trait MergeFn: Send + Sync {
    fn merge(&self, payload: &Value, state: &Value) -> Value;
}

impl<F> MergeFn for F
where
    F: Fn(&Value, &Value) -> Value + Send + Sync,
{
    fn merge(&self, payload: &Value, state: &Value) -> Value {
        self(payload, state)
    }
}

/// How a registered action type turns `(state, payload)` into the next state.
#[derive(Clone)]
pub enum Transition {
    /// Returns the state unchanged (store initialization actions).
    Identity,
    /// Places the payload at a dotted path.
    Set { path: String },
    /// Shallow-merges the merge function's result over the state.
    Merge { name: String, merge: Arc<dyn MergeFn> },
}

impl Transition {
    pub fn set(path: impl Into<String>) -> Self {
        Transition::Set { path: path.into() }
    }

    pub fn merge(name: impl Into<String>, merge: Arc<dyn MergeFn>) -> Self {
        Transition::Merge {
            name: name.into(),
            merge,
        }
    }

    /// Compute the next state. `state` is not modified.
    pub fn apply(&self, state: &Value, payload: &Value) -> Result<Value, DispatchError> {
        match self {
            Transition::Identity => Ok(state.clone()),
            Transition::Set { path } => Ok(set_path(state, path, payload.clone())),
            Transition::Merge { name, merge } => {
                let patch = merge.merge(payload, state);
                let found = kind_of(&patch);
                shallow_merge(state, patch).ok_or_else(|| DispatchError::InvalidMergeResult {
                    name: name.clone(),
                    found: found.to_string(),
                })
            }
        }
    }

    pub fn summary(&self) -> TransitionSummary {
        match self {
            Transition::Identity => TransitionSummary::Identity,
            Transition::Set { path } => TransitionSummary::Set { path: path.clone() },
            Transition::Merge { name, .. } => TransitionSummary::Merge { name: name.clone() },
        }
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Identity => write!(f, "Identity"),
            Transition::Set { path } => f.debug_struct("Set").field("path", path).finish(),
            Transition::Merge { name, .. } => {
                f.debug_struct("Merge").field("name", name).finish_non_exhaustive()
            }
        }
    }
}

/// Serializable view of a [`Transition`], without the merge closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionSummary {
    Identity,
    Set { path: String },
    Merge { name: String },
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
