//! Seams between the lifecycle orchestrator and its collaborators.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::action::Action;
use crate::registry::DispatchError;

/// Receives actions produced by a lifecycle, in order.
///
/// Each call must apply the action before returning; the orchestrator relies
/// on that to guarantee loading/error/result ordering. A failed dispatch
/// after the operation fulfilled is published as the field's error flag.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, action: Action) -> Result<(), DispatchError>;
}

/// A caller-supplied asynchronous operation, commonly a network request.
///
/// `Err` carries the rejection reason, which is published as the field's
/// error flag.
#[async_trait]
pub trait AsyncOperation: Send + Sync {
    async fn call(&self, query: Value) -> Result<Value, Value>;
}

#[async_trait]
impl<F, Fut> AsyncOperation for F
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, Value>> + Send + 'static,
{
    async fn call(&self, query: Value) -> Result<Value, Value> {
        self(query).await
    }
}

/// Post-processes an operation's fulfilled value into the data to publish.
///
/// Only invoked when [`ResultAccessor::applies`] accepts the value; otherwise
/// the value is published as-is.
#[async_trait]
pub trait ResultAccessor: Send + Sync {
    fn applies(&self, data: &Value) -> bool;

    async fn extract(&self, data: Value) -> Result<Value, Value>;
}

/// Extracts a named member from an object result, e.g. the `body` of a
/// response envelope.
#[derive(Debug, Clone)]
pub struct MemberAccessor {
    member: String,
}

impl MemberAccessor {
    pub fn new(member: impl Into<String>) -> Self {
        Self {
            member: member.into(),
        }
    }
}

#[async_trait]
impl ResultAccessor for MemberAccessor {
    fn applies(&self, data: &Value) -> bool {
        data.get(&self.member).is_some()
    }

    async fn extract(&self, mut data: Value) -> Result<Value, Value> {
        data.get_mut(&self.member)
            .map(Value::take)
            .ok_or_else(|| Value::String(format!("missing member '{}'", self.member)))
    }
}
