//! Root reducer and external reducer integration.

mod root;

pub use crate::registry::DispatchError;
pub use root::{ExternalReducer, RootReducer, UnknownActionPolicy};
