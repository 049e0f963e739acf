use std::fs;
use std::path::Path;
use tracing::debug;
use crate::error::{Result, VerifyError};
use super::VerifierConfig;

/// Reads YAML overrides on top of the compiled-in defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: impl AsRef<Path>) -> Result<VerifierConfig> {
        let path = path.as_ref();
        let yaml_content = fs::read_to_string(path)
            .map_err(|_| VerifyError::ConfigFileNotFound(path.display().to_string()))?;

        debug!("Loaded config overrides from {}", path.display());
        Self::from_yaml(&yaml_content)
    }

    pub fn from_yaml(yaml_content: &str) -> Result<VerifierConfig> {
        if yaml_content.trim().is_empty() {
            return Ok(VerifierConfig::default());
        }

        let config: VerifierConfig = serde_yaml::from_str(yaml_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when no path is given, the file's overrides otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<VerifierConfig> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(VerifierConfig::default()),
        }
    }
}
