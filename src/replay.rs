//! Replaying a script of operations against a store.

use serde::Deserialize;
use serde_json::Value;

use crate::action::{Action, ActionFactory, InputEvent};
use crate::reducer::DispatchError;
use crate::store::Store;

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayOp {
    /// Call the `set` creator for `field` with a raw value.
    Set { field: String, value: Value },
    /// Call the `set` creator for `field` with an input event wrapping `value`.
    Event { field: String, value: Value },
    /// Dispatch an action as-is.
    Raw {
        #[serde(rename = "type")]
        action_type: String,
        #[serde(default)]
        payload: Value,
    },
}

impl ReplayOp {
    pub fn to_action(&self, factory: &ActionFactory) -> Action {
        match self {
            ReplayOp::Set { field, value } => factory.set(field).create(value.clone()),
            ReplayOp::Event { field, value } => {
                factory.set(field).create(InputEvent::new(value.clone()))
            }
            ReplayOp::Raw {
                action_type,
                payload,
            } => Action::new(action_type.clone(), payload.clone()),
        }
    }
}

/// Parse a JSON-lines script. Blank lines and lines starting with `#` are
/// skipped. Errors carry the 1-based line number.
pub fn parse_script(script: &str) -> Result<Vec<ReplayOp>, (usize, serde_json::Error)> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| serde_json::from_str(line).map_err(|e| (i + 1, e)))
        .collect()
}

/// Apply `ops` in order, stopping at the first failed dispatch.
pub fn replay(
    store: &Store,
    factory: &ActionFactory,
    ops: &[ReplayOp],
) -> Result<Value, DispatchError> {
    for op in ops {
        let action = op.to_action(factory);
        tracing::debug!(action_type = %action.action_type, "Replaying action");
        store.try_dispatch(&action)?;
    }
    Ok(store.state())
}
