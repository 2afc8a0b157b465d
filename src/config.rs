use crate::error::{Error, Result};
use crate::source::MAX_SIZE;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings read from a TOML file.
///
/// ```toml
/// size-property = "max-width"
/// default-size = 200
/// ```
///
/// Missing keys fall back to their defaults; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// CSS property written on each image.
    pub size_property: String,
    /// Size offered when prompting.
    pub default_size: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size_property: "max-height".to_string(),
            default_size: 150,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        config.validate()?;
        tracing::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size_property.trim().is_empty() {
            return Err(Error::Config("size-property must not be empty".to_string()));
        }
        if !(0..=MAX_SIZE).contains(&self.default_size) {
            return Err(Error::Config(format!(
                "default-size must be between 0 and {MAX_SIZE}, got {}",
                self.default_size
            )));
        }
        Ok(())
    }
}
