use serde::{Deserialize, Serialize};

use crate::reducer::UnknownActionPolicy;
use crate::registry::{INIT, REDUX_INIT};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// How the root reducer and registry are set up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Behavior for actions no reducer recognizes (default: tolerant).
    #[serde(default)]
    pub policy: UnknownActionPolicy,
    /// Action types pre-registered as identity transitions. The first one is
    /// dispatched to initialize a store.
    #[serde(default = "default_init_actions")]
    pub init_actions: Vec<String>,
}

fn default_init_actions() -> Vec<String> {
    vec![REDUX_INIT.to_string(), INIT.to_string()]
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            policy: UnknownActionPolicy::default(),
            init_actions: default_init_actions(),
        }
    }
}
