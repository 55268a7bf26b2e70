//! Event loop configuration.

use serde::{Deserialize, Serialize};

/// Tunables for an [`EventLoop`](crate::EventLoop).
///
/// # Examples
///
/// ```
/// use promise_core::EventLoopConfig;
///
/// let config = EventLoopConfig::from_json(r#"{ "max_turns": 64 }"#).unwrap();
/// assert_eq!(config.max_turns, Some(64));
///
/// let defaults = EventLoopConfig::from_json("{}").unwrap();
/// assert_eq!(defaults, EventLoopConfig::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventLoopConfig {
    /// Maximum number of microtasks a single drain may run.
    ///
    /// `None` means unbounded. A thenable that keeps resolving with fresh
    /// thenables never settles; this bound turns such a loop into a
    /// [`RuntimeError::TurnLimitExceeded`](crate::RuntimeError::TurnLimitExceeded).
    pub max_turns: Option<usize>,
}

impl EventLoopConfig {
    /// Config with a microtask budget per drain.
    pub fn with_max_turns(max_turns: usize) -> Self {
        Self {
            max_turns: Some(max_turns),
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
