//! Binding configuration.
//!
//! Decoded from JSON handed over by the embedding page, or built in code.

use serde::Deserialize;

use crate::error::Result;

/// Runtime options shared by every binding created through a [`Context`](crate::Context).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Release the host function of a [`Callback`](crate::Callback) when the
    /// token is dropped. When false the token must be released explicitly,
    /// otherwise the host function lives as long as the page.
    pub release_on_drop: bool,
    /// Emit a trace record for every event routed to a listener.
    pub trace_dispatch: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            release_on_drop: true,
            trace_dispatch: false,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
