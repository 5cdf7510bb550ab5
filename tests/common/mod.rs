//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use reducegen::{
    Action, ActionFactory, Dispatch, DispatchError, RootReducer, Store, TransitionRegistry,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Dispatcher that records every action it receives, in order.
#[derive(Default)]
pub struct RecordingDispatcher {
    actions: Mutex<Vec<Action>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().clone()
    }

    /// Recorded actions as `TYPE:payload` strings for compact assertions.
    pub fn log(&self) -> Vec<String> {
        self.actions
            .lock()
            .iter()
            .map(|a| format!("{}:{}", a.action_type, a.payload))
            .collect()
    }
}

impl Dispatch for RecordingDispatcher {
    fn dispatch(&self, action: Action) -> Result<(), DispatchError> {
        self.actions.lock().push(action);
        Ok(())
    }
}

/// Fresh registry, factory and tolerant store over `default_state`.
pub fn setup(default_state: Value) -> (Arc<TransitionRegistry>, ActionFactory, Store) {
    let registry = Arc::new(TransitionRegistry::new());
    let factory = ActionFactory::new(Arc::clone(&registry));
    let reducer = RootReducer::new(default_state, Arc::clone(&registry));
    let store = Store::new(Arc::new(reducer)).expect("store init");
    (registry, factory, store)
}

/// Write `content` to a file named `name` inside a new temp dir.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    (temp_dir, path)
}
