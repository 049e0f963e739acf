mod loader;

use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::error::{Result, VerifyError};

pub use loader::ConfigLoader;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const USER_AGENT: &str = "voxel-engine-verifier";

/// Full verifier configuration. Built once at startup and passed by reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    pub env: EnvConfig,
    pub repo: RepoConfig,
    pub files: FilesToVerify,
    pub flow: VerificationFlow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub github_token_var: String,
    pub github_org_var: String,
    pub env_file: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            github_token_var: "MCP_GITHUB_TOKEN".to_string(),
            github_org_var: "GITHUB_EVAL_ORG".to_string(),
            env_file: ".mcp_env".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    pub repo_name: String,
    pub target_branch: String,
    pub api_version: String,
    pub timeout_secs: u64,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            repo_name: "voxel-engine-docs".to_string(),
            target_branch: "main".to_string(),
            api_version: "v3".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8", alias = "UTF-8")]
    Utf8,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "utf-8"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesToVerify {
    pub answer_file: AnswerFileConfig,
    pub reference_file: ReferenceFileConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerFileConfig {
    pub path: String,
    pub encoding: Encoding,
    pub content_schema: ContentSchema,
}

impl Default for AnswerFileConfig {
    fn default() -> Self {
        Self {
            path: "ANSWER.md".to_string(),
            encoding: Encoding::Utf8,
            content_schema: ContentSchema::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSchema {
    pub pattern: String,
    pub expected_value: String,
}

impl Default for ContentSchema {
    fn default() -> Self {
        Self {
            pattern: r"^\d{4}-\d{2}-\d{2}$".to_string(),
            expected_value: "2023-11-15".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceFileConfig {
    pub path: String,
    pub encoding: Encoding,
    pub content_checks: ContentChecks,
}

impl Default for ReferenceFileConfig {
    fn default() -> Self {
        Self {
            path: "README.md".to_string(),
            encoding: Encoding::Utf8,
            content_checks: ContentChecks::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentChecks {
    pub required_section: String,
    pub required_entries: Vec<String>,
    /// Second gate on the required-entries check, alongside the flow flag.
    pub check_entries: bool,
}

impl Default for ContentChecks {
    fn default() -> Self {
        Self {
            required_section: "## Voxel Engine Implementation".to_string(),
            required_entries: vec![
                "C++ Voxel Engine Fundamentals".to_string(),
                "Vulkan-based Voxel Rendering".to_string(),
            ],
            check_entries: true,
        }
    }
}

/// Switches for the six content checks. A disabled check passes silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationFlow {
    pub check_answer_file_existence: bool,
    pub check_answer_format: bool,
    pub verify_answer_value: bool,
    pub check_reference_file: bool,
    pub check_section_existence: bool,
    pub check_required_entries: bool,
}

impl Default for VerificationFlow {
    fn default() -> Self {
        Self {
            check_answer_file_existence: true,
            check_answer_format: true,
            verify_answer_value: true,
            check_reference_file: true,
            check_section_existence: true,
            check_required_entries: true,
        }
    }
}

impl VerifierConfig {
    pub fn with_env_file(mut self, env_file: impl Into<String>) -> Self {
        self.env.env_file = env_file.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.repo.target_branch = branch.into();
        self
    }

    pub fn answer_pattern(&self) -> Result<Regex> {
        let pattern = &self.files.answer_file.content_schema.pattern;
        Regex::new(pattern).map_err(|e| VerifyError::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("env.github_token_var", &self.env.github_token_var),
            ("env.github_org_var", &self.env.github_org_var),
            ("repo.repo_name", &self.repo.repo_name),
            ("repo.target_branch", &self.repo.target_branch),
            ("repo.api_version", &self.repo.api_version),
            ("files.answer_file.path", &self.files.answer_file.path),
            ("files.reference_file.path", &self.files.reference_file.path),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(VerifyError::Config(format!("{} must not be empty", name)));
            }
        }

        if self.repo.timeout_secs == 0 {
            return Err(VerifyError::Config("repo.timeout_secs must be greater than 0".into()));
        }

        self.answer_pattern()?;
        Ok(())
    }
}
