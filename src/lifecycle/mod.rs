//! Asynchronous action lifecycle.
//!
//! Suspension only happens inside the wrapped operation; every dispatch
//! around it is synchronous, so the loading/error/result ordering observed
//! by the store is exactly the order they are issued in.

mod orchestrator;
mod traits;

pub use orchestrator::{AsyncLifecycle, Outcome};
pub use traits::{AsyncOperation, Dispatch, MemberAccessor, ResultAccessor};
