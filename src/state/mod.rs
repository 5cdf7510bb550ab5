//! State tree helpers.
//!
//! State is a plain `serde_json::Value`. Every transition produces a new
//! value; the previous state is never mutated in place.

mod path;

pub use path::{get_path, set_path, shallow_merge};
