//! Crisis keyword configuration.

use serde::{Deserialize, Serialize};

/// Risk keyword override.
///
/// `None` keeps the built-in Japanese keyword set. The list is read once
/// at startup and never reloaded.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskConfig {
    pub keywords: Option<Vec<String>>,
}
