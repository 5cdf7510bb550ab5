//! Generated actions and reducers over a JSON state tree.
//!
//! Declare how a field updates once and get the action creator, its action
//! type and its transition together:
//!
//! ```
//! use std::sync::Arc;
//! use reducegen::{ActionFactory, RootReducer, Store, TransitionRegistry};
//! use serde_json::json;
//!
//! let registry = Arc::new(TransitionRegistry::new());
//! let factory = ActionFactory::new(Arc::clone(&registry));
//! let store = Store::new(Arc::new(RootReducer::new(json!({}), registry))).unwrap();
//!
//! let set_name = factory.set("user.name");
//! store.try_dispatch(&set_name.create("ada")).unwrap();
//! assert_eq!(store.state(), json!({"user": {"name": "ada"}}));
//! ```

pub mod action;
pub mod config;
pub mod lifecycle;
pub mod logging;
pub mod reducer;
pub mod registry;
pub mod replay;
pub mod state;
pub mod store;

pub use action::{Action, ActionFactory, ActionInput, InputEvent};
pub use lifecycle::{AsyncLifecycle, AsyncOperation, Dispatch, MemberAccessor, ResultAccessor};
pub use reducer::{DispatchError, ExternalReducer, RootReducer, UnknownActionPolicy};
pub use registry::{Transition, TransitionRegistry};
pub use store::Store;
