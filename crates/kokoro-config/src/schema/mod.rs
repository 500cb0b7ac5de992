//! Configuration schema types for kokoro.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod model;
mod risk;
mod system;

pub use model::*;
pub use risk::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for kokoro.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct KokoroConfig {
    pub model: ModelConfig,
    pub risk: RiskConfig,
    pub logging: LoggingConfig,
}
