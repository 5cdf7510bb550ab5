//! The root reducer consulted by the store on every dispatch.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;
use crate::registry::{DispatchError, TransitionRegistry};

/// A hand-written reducer consulted before the registry.
///
/// Returning a state equal to the input means "not handled".
pub trait ExternalReducer: Send + Sync {
    fn reduce(&self, state: &Value, action: &Action) -> Value;
}

impl<F> ExternalReducer for F
where
    F: Fn(&Value, &Action) -> Value + Send + Sync,
{
    fn reduce(&self, state: &Value, action: &Action) -> Value {
        self(state, action)
    }
}

/// What to do with an action nothing recognizes.
///
/// Only covers unknown action types. A registered merge transition that
/// returns a non-object fails with [`DispatchError::InvalidMergeResult`]
/// under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownActionPolicy {
    /// Return the state unchanged.
    #[default]
    Tolerant,
    /// Fail with [`DispatchError::ReducerNotFound`].
    Strict,
}

/// Resolves an action to the next state.
///
/// Resolution order:
/// 1. external reducers in registration order; the first whose result
///    differs from the input state wins
/// 2. the transition registered for the action type
/// 3. the unknown-action policy
pub struct RootReducer {
    default_state: Value,
    registry: Arc<TransitionRegistry>,
    external: RwLock<Vec<Arc<dyn ExternalReducer>>>,
    policy: UnknownActionPolicy,
}

impl RootReducer {
    pub fn new(default_state: Value, registry: Arc<TransitionRegistry>) -> Self {
        Self {
            default_state,
            registry,
            external: RwLock::new(Vec::new()),
            policy: UnknownActionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownActionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> UnknownActionPolicy {
        self.policy
    }

    pub fn default_state(&self) -> &Value {
        &self.default_state
    }

    pub fn registry(&self) -> &Arc<TransitionRegistry> {
        &self.registry
    }

    /// Append external reducers. Earlier registrations take priority.
    pub fn add_reducers<I>(&self, reducers: I)
    where
        I: IntoIterator<Item = Arc<dyn ExternalReducer>>,
    {
        let mut external = self.external.write();
        let before = external.len();
        external.extend(reducers);
        tracing::debug!(
            added = external.len() - before,
            total = external.len(),
            "Added external reducers"
        );
    }

    pub fn external_count(&self) -> usize {
        self.external.read().len()
    }

    /// Compute the next state. `None` stands for "no state yet" and is
    /// replaced by the default state.
    pub fn reduce(&self, state: Option<Value>, action: &Action) -> Result<Value, DispatchError> {
        let state = state.unwrap_or_else(|| self.default_state.clone());

        // Snapshot so reducers may register more reducers without deadlocking.
        let external: Vec<Arc<dyn ExternalReducer>> = self.external.read().clone();
        for reducer in &external {
            let next = reducer.reduce(&state, action);
            if next != state {
                tracing::trace!(action_type = %action.action_type, "Handled by external reducer");
                return Ok(next);
            }
        }

        if let Some(result) = self
            .registry
            .apply(&action.action_type, &state, &action.payload)
        {
            tracing::trace!(action_type = %action.action_type, "Handled by registered transition");
            return result;
        }

        match self.policy {
            UnknownActionPolicy::Tolerant => Ok(state),
            UnknownActionPolicy::Strict => {
                tracing::warn!(action_type = %action.action_type, "No reducer for action");
                Err(DispatchError::ReducerNotFound {
                    action_type: action.action_type.clone(),
                })
            }
        }
    }
}

impl std::fmt::Debug for RootReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootReducer")
            .field("default_state", &self.default_state)
            .field("registry", &self.registry)
            .field("external", &self.external_count())
            .field("policy", &self.policy)
            .finish()
    }
}
