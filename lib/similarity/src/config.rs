use platewise_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Limits applied to incoming recommendation requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Result count used when a request does not ask for one
    pub default_limit: usize,
    /// Largest result count a request may ask for
    pub max_limit: usize,
    /// Lowest accepted rating importance weight
    pub weight_min: f64,
    /// Highest accepted rating importance weight
    pub weight_max: f64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            default_limit: 5,
            max_limit: 10,
            weight_min: 1.0,
            weight_max: 3.0,
        }
    }
}

impl RecommenderConfig {
    /// Load a config from a JSON file. Missing keys take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_limit == 0 {
            return Err(Error::InvalidConfig("max_limit must be at least 1".to_string()));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(Error::InvalidConfig(format!(
                "default_limit must be between 1 and max_limit ({}), got {}",
                self.max_limit, self.default_limit
            )));
        }
        if !self.weight_min.is_finite()
            || !self.weight_max.is_finite()
            || self.weight_min > self.weight_max
        {
            return Err(Error::InvalidConfig(format!(
                "invalid weight bounds [{}, {}]",
                self.weight_min, self.weight_max
            )));
        }
        Ok(())
    }
}
