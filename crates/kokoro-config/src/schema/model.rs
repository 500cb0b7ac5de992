//! Remote model selection.

use serde::{Deserialize, Serialize};

/// Model variant used when the config does not name one.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Which remote model variant is addressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier inserted into the endpoint path,
    /// e.g. `gemini-1.5-flash` or `gemini-1.0-pro`.
    pub name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
        }
    }
}
