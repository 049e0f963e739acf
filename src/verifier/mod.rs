use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use crate::checks::{ContentValidator, FileReport};
use crate::config::VerifierConfig;
use crate::content::ContentFetcher;
use crate::env::{load_credentials, EnvSource};
use crate::error::Result;
use crate::github::{ApiHeaders, GitHubClient, HttpTransport};
use crate::report::Reporter;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    LoadEnv,
    ValidateAnswer,
    ValidateReference,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::LoadEnv => "load_env",
            Stage::ValidateAnswer => "validate_answer",
            Stage::ValidateReference => "validate_reference",
            Stage::Done => "done",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub success: bool,
    pub failed_stage: Option<Stage>,
    pub organization: Option<String>,
    pub repository: String,
    pub branch: String,
    pub answer: Option<FileReport>,
    pub reference: Option<FileReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl VerificationReport {
    fn new(config: &VerifierConfig) -> Self {
        let now = Utc::now();
        Self {
            success: false,
            failed_stage: None,
            organization: None,
            repository: config.repo.repo_name.clone(),
            branch: config.repo.target_branch.clone(),
            answer: None,
            reference: None,
            started_at: now,
            finished_at: now,
        }
    }

    /// `Done` on success, otherwise the stage that failed.
    pub fn final_stage(&self) -> Stage {
        self.failed_stage.unwrap_or(Stage::Done)
    }

    fn finish(mut self, failed_stage: Option<Stage>) -> Self {
        self.success = failed_stage.is_none();
        self.failed_stage = failed_stage;
        self.finished_at = Utc::now();
        self
    }
}

/// Runs `LoadEnv -> ValidateAnswer -> ValidateReference -> Done`,
/// stopping at the first stage that fails.
pub struct Verifier<'a> {
    config: &'a VerifierConfig,
    transport: &'a dyn HttpTransport,
    validator: ContentValidator<'a>,
}

impl<'a> Verifier<'a> {
    pub fn new(config: &'a VerifierConfig, transport: &'a dyn HttpTransport) -> Result<Self> {
        Ok(Self {
            config,
            transport,
            validator: ContentValidator::new(config)?,
        })
    }

    pub async fn run(&self, env: &EnvSource, reporter: &mut dyn Reporter) -> VerificationReport {
        let config = self.config;
        let mut report = VerificationReport::new(config);

        reporter.info("Starting answer file verification...");
        reporter.info(&"=".repeat(RULE_WIDTH));

        reporter.step("[Step 1/3] Loading environment configuration...");
        let credentials = load_credentials(&config.env, env, reporter);
        let (token, organization) = match credentials.complete() {
            Some(pair) => pair,
            None => {
                reporter.fail("Environment configuration incomplete, aborting verification");
                return report.finish(Some(Stage::LoadEnv));
            }
        };
        report.organization = Some(organization.to_string());

        let headers = ApiHeaders::build(token, &config.repo.api_version);
        debug!(?headers, "Built request headers");
        reporter.pass(&format!(
            "Environment loaded (organization: {}, repository: {})",
            organization, config.repo.repo_name
        ));

        let fetcher = ContentFetcher::new(GitHubClient::new(self.transport, &config.repo));

        reporter.step("[Step 2/3] Verifying answer file...");
        let answer_file = &config.files.answer_file;
        let answer_content = fetcher
            .get_file_content(&answer_file.path, &headers, organization, None, answer_file.encoding, reporter)
            .await;
        let answer = self.validator.check_answer(answer_content.as_deref(), reporter);
        let answer_ok = answer.all_passed();
        report.answer = Some(answer);
        if !answer_ok {
            reporter.fail("Answer file verification failed");
            return report.finish(Some(Stage::ValidateAnswer));
        }

        reporter.step("[Step 3/3] Verifying reference file...");
        let reference_file = &config.files.reference_file;
        let reference_content = fetcher
            .get_file_content(&reference_file.path, &headers, organization, None, reference_file.encoding, reporter)
            .await;
        let reference = self.validator.check_reference(reference_content.as_deref(), reporter);
        let reference_ok = reference.all_passed();
        report.reference = Some(reference);
        if !reference_ok {
            reporter.fail("Reference file verification failed");
            return report.finish(Some(Stage::ValidateReference));
        }

        self.print_summary(organization, reporter);
        report.finish(None)
    }

    fn print_summary(&self, organization: &str, reporter: &mut dyn Reporter) {
        let config = self.config;
        let answer = &config.files.answer_file;
        let reference = &config.files.reference_file;

        reporter.info("");
        reporter.info(&"=".repeat(RULE_WIDTH));
        reporter.pass("All verification checks passed!");
        reporter.info("Summary:");
        reporter.info(&format!("   - Repository: {}/{}", organization, config.repo.repo_name));
        reporter.info(&format!("   - Branch: {}", config.repo.target_branch));
        reporter.info(&format!(
            "   - Answer file: {} (value: {})",
            answer.path, answer.content_schema.expected_value
        ));
        reporter.info(&format!(
            "   - Reference file: {} (section: {})",
            reference.path, reference.content_checks.required_section
        ));
        reporter.info(&"=".repeat(RULE_WIDTH));
    }
}
