//! Model fitting options handed to the engine along with the parameters.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default iteration cap for one fit
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Options for the engine's model fitting stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelFittingConfig {
    /// Maximum number of iterations allowed for model fitting. Default: 1000
    pub max_iterations: u32,
}

impl Default for ModelFittingConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ModelFittingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidConfig(format!(
                "invalid max_iterations value: {}",
                self.max_iterations
            )));
        }
        Ok(())
    }

    /// Parse and validate options from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
