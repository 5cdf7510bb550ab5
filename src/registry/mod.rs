//! Registry of generated transitions keyed by action type.

mod error;
mod table;
mod transition;

pub use error::DispatchError;
pub use table::{TransitionRegistry, INIT, REDUX_INIT};
pub use transition::{MergeFn, Transition, TransitionSummary};
