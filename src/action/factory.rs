//! Action-creator factory.
//!
//! Creators derive their action type up front, then on every `create` call
//! register the matching transition if it is missing and build the action.

use std::sync::Arc;

use serde_json::Value;

use super::ident::{action_type, Verb};
use super::{Action, ActionInput};
use crate::lifecycle::{AsyncLifecycle, AsyncOperation, Outcome};
use crate::registry::{MergeFn, Transition, TransitionRegistry};

/// Suffix of the field holding an async field's loading flag.
pub const LOADING_SUFFIX: &str = "_loading";
/// Suffix of the field holding an async field's error flag.
pub const ERROR_SUFFIX: &str = "_error";

/// Builds action creators that register into a shared registry.
#[derive(Debug, Clone)]
pub struct ActionFactory {
    registry: Arc<TransitionRegistry>,
}

impl ActionFactory {
    pub fn new(registry: Arc<TransitionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<TransitionRegistry> {
        &self.registry
    }

    /// Creator that assigns its payload to `field` (a dotted path).
    pub fn set(&self, field: &str) -> SetAction {
        SetAction {
            registry: Arc::clone(&self.registry),
            field: field.to_string(),
            action_type: action_type(field, &Verb::Set),
        }
    }

    /// Creator whose transition merges `merge(payload, state)` over the state.
    pub fn update<M>(&self, field: &str, merge: M) -> UpdateAction
    where
        M: MergeFn + 'static,
    {
        UpdateAction::new(Arc::clone(&self.registry), field, Verb::Update, Arc::new(merge))
    }

    /// Reusable verb: one merge function applied to many fields, each field
    /// getting its own `<VERB>_<FIELD>` action type.
    pub fn action<M>(&self, verb: &str, merge: M) -> GenericAction
    where
        M: MergeFn + 'static,
    {
        GenericAction {
            registry: Arc::clone(&self.registry),
            verb: Verb::Custom(verb.to_string()),
            merge: Arc::new(merge),
        }
    }

    /// `SET_<FIELD>_LOADING` action carrying `loading`.
    pub fn loading(&self, field: &str, loading: bool) -> Action {
        self.set(&format!("{field}{LOADING_SUFFIX}")).create(loading)
    }

    /// `SET_<FIELD>_ERROR` action carrying `error` (`false` clears it).
    pub fn error(&self, field: &str, error: Value) -> Action {
        self.set(&format!("{field}{ERROR_SUFFIX}")).create(error)
    }

    /// Async lifecycle whose result is merged into the state via `merge`.
    pub fn async_update<M, O>(&self, field: &str, merge: M, operation: O) -> AsyncLifecycle
    where
        M: MergeFn + 'static,
        O: AsyncOperation + 'static,
    {
        let outcome = Outcome::Update(self.update(field, merge));
        AsyncLifecycle::new(self.clone(), field, outcome, Arc::new(operation))
    }

    /// Async lifecycle whose result is assigned directly to `field`.
    pub fn async_set<O>(&self, field: &str, operation: O) -> AsyncLifecycle
    where
        O: AsyncOperation + 'static,
    {
        let outcome = Outcome::Set(self.set(field));
        AsyncLifecycle::new(self.clone(), field, outcome, Arc::new(operation))
    }
}

/// Creator for `SET_<FIELD>` actions.
#[derive(Debug, Clone)]
pub struct SetAction {
    registry: Arc<TransitionRegistry>,
    field: String,
    action_type: String,
}

impl SetAction {
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn create(&self, input: impl Into<ActionInput>) -> Action {
        self.registry
            .register_if_absent(&self.action_type, Transition::set(self.field.clone()));
        Action::new(self.action_type.clone(), input.into().into_payload())
    }
}

/// Creator for merge-based actions (`UPDATE_<FIELD>` or a custom verb).
#[derive(Clone)]
pub struct UpdateAction {
    registry: Arc<TransitionRegistry>,
    action_type: String,
    merge: Arc<dyn MergeFn>,
}

impl UpdateAction {
    fn new(
        registry: Arc<TransitionRegistry>,
        field: &str,
        verb: Verb,
        merge: Arc<dyn MergeFn>,
    ) -> Self {
        Self {
            registry,
            action_type: action_type(field, &verb),
            merge,
        }
    }

    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    pub fn create(&self, input: impl Into<ActionInput>) -> Action {
        let transition = Transition::merge(self.action_type.clone(), Arc::clone(&self.merge));
        self.registry.register_if_absent(&self.action_type, transition);
        Action::new(self.action_type.clone(), input.into().into_payload())
    }
}

impl std::fmt::Debug for UpdateAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateAction")
            .field("action_type", &self.action_type)
            .finish_non_exhaustive()
    }
}

/// A verb bound to a merge function, specialized per field with [`GenericAction::field`].
#[derive(Clone)]
pub struct GenericAction {
    registry: Arc<TransitionRegistry>,
    verb: Verb,
    merge: Arc<dyn MergeFn>,
}

impl GenericAction {
    pub fn verb(&self) -> &Verb {
        &self.verb
    }

    pub fn field(&self, field: &str) -> UpdateAction {
        UpdateAction::new(
            Arc::clone(&self.registry),
            field,
            self.verb.clone(),
            Arc::clone(&self.merge),
        )
    }
}

impl std::fmt::Debug for GenericAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericAction")
            .field("verb", &self.verb)
            .finish_non_exhaustive()
    }
}
