use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};
use crate::config::EnvConfig;
use crate::report::Reporter;

/// Key-value source: the process environment first, then the env file.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    file_vars: HashMap<String, String>,
    use_process_env: bool,
}

impl EnvSource {
    /// Reads `path` if it exists. A missing file leaves only the process environment.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut file_vars = HashMap::new();

        match dotenvy::from_path_iter(path) {
            Ok(iter) => {
                for item in iter {
                    match item {
                        Ok((key, value)) => {
                            file_vars.insert(key, value);
                        }
                        Err(e) => warn!("Skipping unparsable line in {}: {}", path.display(), e),
                    }
                }
                debug!("Read {} variables from {}", file_vars.len(), path.display());
            }
            Err(e) => debug!("Env file {} not loaded: {}", path.display(), e),
        }

        Self {
            file_vars,
            use_process_env: true,
        }
    }

    /// A source isolated from the process environment.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            file_vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            use_process_env: false,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let from_process = if self.use_process_env {
            std::env::var(key).ok()
        } else {
            None
        };

        from_process
            .or_else(|| self.file_vars.get(key).cloned())
            .filter(|v| !v.is_empty())
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub organization: Option<String>,
}

impl Credentials {
    pub fn complete(&self) -> Option<(&str, &str)> {
        match (&self.token, &self.organization) {
            (Some(token), Some(org)) => Some((token.as_str(), org.as_str())),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_deref().map(redact_token))
            .field("organization", &self.organization)
            .finish()
    }
}

pub fn redact_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    format!("{}***", visible)
}

/// Reads both credential variables, reporting each one that is missing.
pub fn load_credentials(
    config: &EnvConfig,
    source: &EnvSource,
    reporter: &mut dyn Reporter,
) -> Credentials {
    let token = source.get(&config.github_token_var);
    let organization = source.get(&config.github_org_var);

    if token.is_none() {
        reporter.fail(&format!(
            "Environment variable {} not found (check {})",
            config.github_token_var, config.env_file
        ));
    }
    if organization.is_none() {
        reporter.fail(&format!(
            "Environment variable {} not found (check {})",
            config.github_org_var, config.env_file
        ));
    }

    Credentials { token, organization }
}
