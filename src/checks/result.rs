use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed,
    /// Disabled by its flow flag. Counts as a pass.
    Skipped,
    /// Never ran because the file content was absent. Counts as a failure.
    Blocked,
}

impl CheckStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Passed | CheckStatus::Skipped)
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Passed => write!(f, "passed"),
            CheckStatus::Failed => write!(f, "failed"),
            CheckStatus::Skipped => write!(f, "skipped"),
            CheckStatus::Blocked => write!(f, "blocked"),
        }
    }
}

impl CheckResult {
    pub fn passed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Passed, message)
    }

    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Failed, message)
    }

    pub fn skipped(name: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Skipped, "disabled")
    }

    pub fn blocked(name: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Blocked, "content unavailable")
    }

    fn with_status(name: impl Into<String>, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

/// Ordered check results for one verified file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub checks: Vec<CheckResult>,
}

impl FileReport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            checks: Vec::new(),
        }
    }

    pub fn push(&mut self, result: CheckResult) {
        self.checks.push(result);
    }

    /// Logical AND over every check. An empty report has not been verified.
    pub fn all_passed(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(CheckResult::is_ok)
    }

    pub fn passed_count(&self) -> usize {
        self.count(CheckStatus::Passed)
    }

    pub fn failed_count(&self) -> usize {
        self.count(CheckStatus::Failed)
    }

    pub fn skipped_count(&self) -> usize {
        self.count(CheckStatus::Skipped)
    }

    pub fn blocked_count(&self) -> usize {
        self.count(CheckStatus::Blocked)
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|r| r.status == status).count()
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|r| r.name == name)
    }
}
