//! Actions and the factory that generates them.
//!
//! An [`Action`] is a `{type, payload}` record. Action creators built by
//! [`ActionFactory`] derive the type from a field name, register the
//! matching transition on first use, and extract the payload from their
//! input.

mod factory;
mod ident;

pub use factory::{
    ActionFactory, GenericAction, SetAction, UpdateAction, ERROR_SUFFIX, LOADING_SUFFIX,
};
pub use ident::{action_type, Verb};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dispatched state change request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub payload: Value,
}

impl Action {
    pub fn new(action_type: impl Into<String>, payload: Value) -> Self {
        Self {
            action_type: action_type.into(),
            payload,
        }
    }
}

/// Target of an input event; only its `value` is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTarget {
    pub value: Value,
}

/// An input-change event as produced by a view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub target: EventTarget,
}

impl InputEvent {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            target: EventTarget {
                value: value.into(),
            },
        }
    }
}

/// What an action creator is called with.
///
/// Events are tagged explicitly; a plain value shaped like
/// `{"target": {"value": ..}}` is still a plain value.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionInput {
    Value(Value),
    Event(InputEvent),
}

impl ActionInput {
    /// The payload carried by the resulting action.
    pub fn into_payload(self) -> Value {
        match self {
            ActionInput::Value(value) => value,
            ActionInput::Event(event) => event.target.value,
        }
    }
}

impl From<Value> for ActionInput {
    fn from(value: Value) -> Self {
        ActionInput::Value(value)
    }
}

impl From<InputEvent> for ActionInput {
    fn from(event: InputEvent) -> Self {
        ActionInput::Event(event)
    }
}

impl From<&str> for ActionInput {
    fn from(value: &str) -> Self {
        ActionInput::Value(Value::from(value))
    }
}

impl From<bool> for ActionInput {
    fn from(value: bool) -> Self {
        ActionInput::Value(Value::Bool(value))
    }
}
