//! The transition registry shared by action creators and the root reducer.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use super::error::DispatchError;
use super::transition::{Transition, TransitionSummary};

/// Action type dispatched by a Redux-style store when it is created.
pub const REDUX_INIT: &str = "@@redux/INIT";
/// Generic store-initialization action type.
pub const INIT: &str = "@@INIT";

/// Mapping from action type to transition.
///
/// Entries are added lazily by action creators, at most once per action
/// type: the first registered transition stays authoritative until it is
/// explicitly removed. Safe to share across tasks behind an `Arc`.
#[derive(Debug)]
pub struct TransitionRegistry {
    entries: RwLock<HashMap<String, Transition>>,
}

impl Default for TransitionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionRegistry {
    /// Create a registry with the two store-initialization actions mapped to
    /// the identity transition.
    pub fn new() -> Self {
        Self::with_init_actions([REDUX_INIT, INIT])
    }

    /// Create a registry pre-seeded with identity transitions for the given
    /// initialization action types.
    pub fn with_init_actions<I, S>(init_actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = init_actions
            .into_iter()
            .map(|name| (name.into(), Transition::Identity))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Insert `transition` under `action_type` unless an entry already exists.
    ///
    /// Returns `true` if the transition was inserted.
    pub fn register_if_absent(&self, action_type: &str, transition: Transition) -> bool {
        if self.entries.read().contains_key(action_type) {
            return false;
        }

        let mut entries = self.entries.write();
        // Another task may have registered between the two locks.
        if entries.contains_key(action_type) {
            return false;
        }
        tracing::debug!(
            action_type = %action_type,
            transition = ?transition,
            "Registered transition"
        );
        entries.insert(action_type.to_string(), transition);
        true
    }

    pub fn has(&self, action_type: &str) -> bool {
        self.entries.read().contains_key(action_type)
    }

    pub fn get(&self, action_type: &str) -> Option<Transition> {
        self.entries.read().get(action_type).cloned()
    }

    /// Remove an entry so the next action creator call registers afresh.
    pub fn remove(&self, action_type: &str) -> Option<Transition> {
        let removed = self.entries.write().remove(action_type);
        if removed.is_some() {
            tracing::debug!(action_type = %action_type, "Removed transition");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered action types, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Serializable summary of every entry, sorted by action type.
    pub fn describe(&self) -> Vec<(String, TransitionSummary)> {
        let mut summaries: Vec<(String, TransitionSummary)> = self
            .entries
            .read()
            .iter()
            .map(|(id, transition)| (id.clone(), transition.summary()))
            .collect();
        summaries.sort_by(|a, b| a.0.cmp(&b.0));
        summaries
    }

    /// Apply the transition registered for `action_type`, if any.
    pub fn apply(
        &self,
        action_type: &str,
        state: &Value,
        payload: &Value,
    ) -> Option<Result<Value, DispatchError>> {
        // Clone out of the lock so merge functions never run under it.
        let transition = self.get(action_type)?;
        Some(transition.apply(state, payload))
    }
}
