//! Reduction configuration.
//!
//! Every field has a default, so a JSON file only needs the keys it changes:
//!
//! ```json
//! { "max_steps": 500, "strategy": "applicative", "eta": true }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::beta::Strategy;
use crate::error::ConfigError;

pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Configuration for reduction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReductionConfig {
    /// Contractions allowed before giving up with `terminated == false`
    pub max_steps: usize,
    pub strategy: Strategy,
    /// η-reduce the β-normal form
    pub eta: bool,
    /// Record every step taken
    pub trace: bool,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        ReductionConfig {
            max_steps: DEFAULT_MAX_STEPS,
            strategy: Strategy::NormalOrder,
            eta: false,
            trace: false,
        }
    }
}

impl ReductionConfig {
    pub fn new(strategy: Strategy, max_steps: usize) -> Self {
        ReductionConfig {
            max_steps,
            strategy,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
