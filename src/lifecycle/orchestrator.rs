//! Loading/error/result sequencing around one asynchronous operation.

use std::sync::Arc;

use serde_json::Value;

use super::traits::{AsyncOperation, Dispatch, ResultAccessor};
use crate::action::{Action, ActionFactory, SetAction, UpdateAction};

/// The action that publishes a successful result.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Assign the result to the field.
    Set(SetAction),
    /// Merge the result into the state through an update creator.
    Update(UpdateAction),
}

impl Outcome {
    fn create(&self, data: Value) -> Action {
        match self {
            Outcome::Set(creator) => creator.create(data),
            Outcome::Update(creator) => creator.create(data),
        }
    }
}

/// Wraps an operation so every run publishes its progress as actions:
///
/// 1. `SET_<FIELD>_LOADING: true`
/// 2. `SET_<FIELD>_ERROR: false`
/// 3. the operation runs (and the accessor, if it applies)
/// 4. on success `SET_<FIELD>_LOADING: false`, then the outcome action
/// 5. on failure `SET_<FIELD>_ERROR: <reason>` and nothing else
///
/// If dispatching step 4 fails (e.g. a merge function returned a non-object),
/// the dispatch error message is published as the error flag.
///
/// Runs never fail; callers read the error flag from state.
#[derive(Clone)]
pub struct AsyncLifecycle {
    factory: ActionFactory,
    field: String,
    outcome: Outcome,
    operation: Arc<dyn AsyncOperation>,
    accessor: Option<Arc<dyn ResultAccessor>>,
}

impl AsyncLifecycle {
    pub(crate) fn new(
        factory: ActionFactory,
        field: &str,
        outcome: Outcome,
        operation: Arc<dyn AsyncOperation>,
    ) -> Self {
        Self {
            factory,
            field: field.to_string(),
            outcome,
            operation,
            accessor: None,
        }
    }

    pub fn with_accessor<A>(mut self, accessor: A) -> Self
    where
        A: ResultAccessor + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Run the operation for `query`, dispatching each lifecycle step.
    pub async fn run<D>(&self, query: Value, dispatcher: &D)
    where
        D: Dispatch + ?Sized,
    {
        self.publish(dispatcher, self.factory.loading(&self.field, true));
        self.publish(dispatcher, self.factory.error(&self.field, Value::Bool(false)));

        let published = match self.resolve(query).await {
            Ok(data) => {
                tracing::debug!(field = %self.field, "Async operation fulfilled");
                dispatcher
                    .dispatch(self.factory.loading(&self.field, false))
                    .and_then(|()| dispatcher.dispatch(self.outcome.create(data)))
                    .map_err(|e| Value::String(e.to_string()))
            }
            Err(reason) => Err(reason),
        };

        if let Err(reason) = published {
            tracing::warn!(
                field = %self.field,
                reason = %reason,
                "Async operation failed"
            );
            self.publish(dispatcher, self.factory.error(&self.field, reason));
        }
    }

    fn publish<D>(&self, dispatcher: &D, action: Action)
    where
        D: Dispatch + ?Sized,
    {
        let action_type = action.action_type.clone();
        if let Err(e) = dispatcher.dispatch(action) {
            tracing::warn!(
                field = %self.field,
                action_type = %action_type,
                error = %e,
                "Lifecycle flag dispatch failed"
            );
        }
    }

    async fn resolve(&self, query: Value) -> Result<Value, Value> {
        let data = self.operation.call(query).await?;
        match &self.accessor {
            Some(accessor) if accessor.applies(&data) => accessor.extract(data).await,
            _ => Ok(data),
        }
    }
}

impl std::fmt::Debug for AsyncLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncLifecycle")
            .field("field", &self.field)
            .field("outcome", &self.outcome)
            .field("has_accessor", &self.accessor.is_some())
            .finish_non_exhaustive()
    }
}
