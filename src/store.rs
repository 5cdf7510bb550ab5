//! Minimal state container driving a [`RootReducer`].

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::action::Action;
use crate::lifecycle::Dispatch;
use crate::reducer::{DispatchError, RootReducer};
use crate::registry::INIT;

/// Holds the current state and replaces it with the root reducer's result on
/// every dispatch.
#[derive(Debug, Clone)]
pub struct Store {
    reducer: Arc<RootReducer>,
    state: Arc<Mutex<Value>>,
}

impl Store {
    /// Create a store and initialize it with the `@@INIT` action.
    pub fn new(reducer: Arc<RootReducer>) -> Result<Self, DispatchError> {
        Self::with_init_action(reducer, INIT)
    }

    /// Create a store initialized by dispatching `init_action` against the
    /// reducer's default state.
    pub fn with_init_action(
        reducer: Arc<RootReducer>,
        init_action: &str,
    ) -> Result<Self, DispatchError> {
        let initial = reducer.reduce(None, &Action::new(init_action, Value::Null))?;
        Ok(Self {
            reducer,
            state: Arc::new(Mutex::new(initial)),
        })
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> Value {
        self.state.lock().clone()
    }

    pub fn reducer(&self) -> &Arc<RootReducer> {
        &self.reducer
    }

    /// Apply `action`, returning the new state. On error the state is left
    /// unchanged.
    pub fn try_dispatch(&self, action: &Action) -> Result<Value, DispatchError> {
        let mut state = self.state.lock();
        let next = self.reducer.reduce(Some(state.clone()), action)?;
        *state = next.clone();
        Ok(next)
    }
}

impl Dispatch for Store {
    fn dispatch(&self, action: Action) -> Result<(), DispatchError> {
        self.try_dispatch(&action).map(|_| ()).map_err(|e| {
            tracing::warn!(
                action_type = %action.action_type,
                error = %e,
                "Dispatch failed, state unchanged"
            );
            e
        })
    }
}
