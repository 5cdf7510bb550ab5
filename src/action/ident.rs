//! Action-type identifiers.

use std::fmt;

/// Verb token that prefixes a generated action type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Plain field assignment (`SET_<FIELD>`).
    Set,
    /// Computed merge update (`UPDATE_<FIELD>`).
    Update,
    /// Caller-chosen verb, upper-cased (`INCREMENT_<FIELD>`).
    Custom(String),
}

impl Verb {
    pub fn token(&self) -> String {
        match self {
            Verb::Set => "SET".to_string(),
            Verb::Update => "UPDATE".to_string(),
            Verb::Custom(name) => name.to_uppercase(),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Derive the action type for `field` under `verb`.
///
/// Deterministic: the same pair always yields the same identifier, which is
/// what makes lazy registration idempotent.
pub fn action_type(field: &str, verb: &Verb) -> String {
    format!("{}_{}", verb.token(), field.to_uppercase())
}
