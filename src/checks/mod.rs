mod result;

use regex::Regex;
use crate::config::VerifierConfig;
use crate::error::Result;
use crate::report::Reporter;

pub use result::{CheckResult, CheckStatus, FileReport};

pub const ANSWER_EXISTENCE: &str = "answer_existence";
pub const ANSWER_FORMAT: &str = "answer_format";
pub const ANSWER_VALUE: &str = "answer_value";
pub const REFERENCE_EXISTENCE: &str = "reference_existence";
pub const REQUIRED_SECTION: &str = "required_section";
pub const REQUIRED_ENTRIES: &str = "required_entries";

/// Content present and non-empty.
fn present(content: Option<&str>) -> Option<&str> {
    content.filter(|c| !c.is_empty())
}

/// The six content checks. Each reports its own pass or failure line;
/// a check disabled by its flow flag passes without output.
pub struct ContentValidator<'a> {
    config: &'a VerifierConfig,
    pattern: Regex,
}

impl<'a> ContentValidator<'a> {
    pub fn new(config: &'a VerifierConfig) -> Result<Self> {
        Ok(Self {
            config,
            pattern: config.answer_pattern()?,
        })
    }

    /// Existence, then format and value when content is present.
    pub fn check_answer(&self, content: Option<&str>, reporter: &mut dyn Reporter) -> FileReport {
        let mut report = FileReport::new(&self.config.files.answer_file.path);
        report.push(self.check_answer_existence(content, reporter));

        match present(content) {
            Some(text) => {
                report.push(self.check_answer_format(text, reporter));
                report.push(self.check_answer_value(text, reporter));
            }
            None => {
                report.push(CheckResult::blocked(ANSWER_FORMAT));
                report.push(CheckResult::blocked(ANSWER_VALUE));
            }
        }

        report
    }

    /// Existence, then section and entries when content is present.
    pub fn check_reference(&self, content: Option<&str>, reporter: &mut dyn Reporter) -> FileReport {
        let mut report = FileReport::new(&self.config.files.reference_file.path);
        report.push(self.check_reference_existence(content, reporter));

        match present(content) {
            Some(text) => {
                report.push(self.check_required_section(text, reporter));
                report.push(self.check_required_entries(text, reporter));
            }
            None => {
                report.push(CheckResult::blocked(REQUIRED_SECTION));
                report.push(CheckResult::blocked(REQUIRED_ENTRIES));
            }
        }

        report
    }

    pub fn check_answer_existence(&self, content: Option<&str>, reporter: &mut dyn Reporter) -> CheckResult {
        if !self.config.flow.check_answer_file_existence {
            return CheckResult::skipped(ANSWER_EXISTENCE);
        }
        let path = &self.config.files.answer_file.path;

        if present(content).is_none() {
            let message = format!("Verification failed: {} does not exist or cannot be read", path);
            reporter.fail(&message);
            return CheckResult::failed(ANSWER_EXISTENCE, message);
        }

        let message = format!("{} exists", path);
        reporter.pass(&message);
        CheckResult::passed(ANSWER_EXISTENCE, message)
    }

    /// The pattern must match at the start of the text. An unanchored end is allowed.
    fn matches_at_start(&self, text: &str) -> bool {
        self.pattern.find(text).map_or(false, |m| m.start() == 0)
    }

    pub fn check_answer_format(&self, content: &str, reporter: &mut dyn Reporter) -> CheckResult {
        if !self.config.flow.check_answer_format {
            return CheckResult::skipped(ANSWER_FORMAT);
        }
        let pattern = self.pattern.as_str();

        if !self.matches_at_start(content.trim()) {
            let message = format!(
                "Verification failed: content format does not match (expected: {})",
                pattern
            );
            reporter.fail(&message);
            return CheckResult::failed(ANSWER_FORMAT, message)
                .with_details(format!("actual: {}", content.trim()));
        }

        let message = format!("Content format is correct (matches {})", pattern);
        reporter.pass(&message);
        CheckResult::passed(ANSWER_FORMAT, message)
    }

    pub fn check_answer_value(&self, content: &str, reporter: &mut dyn Reporter) -> CheckResult {
        if !self.config.flow.verify_answer_value {
            return CheckResult::skipped(ANSWER_VALUE);
        }
        let expected = &self.config.files.answer_file.content_schema.expected_value;
        let actual = content.trim();

        if actual != expected {
            let message = format!(
                "Verification failed: content value mismatch (expected: {}, actual: {})",
                expected, actual
            );
            reporter.fail(&message);
            return CheckResult::failed(ANSWER_VALUE, message);
        }

        let message = format!("Content value is correct ({})", expected);
        reporter.pass(&message);
        CheckResult::passed(ANSWER_VALUE, message)
    }

    pub fn check_reference_existence(&self, content: Option<&str>, reporter: &mut dyn Reporter) -> CheckResult {
        if !self.config.flow.check_reference_file {
            return CheckResult::skipped(REFERENCE_EXISTENCE);
        }
        let path = &self.config.files.reference_file.path;

        if present(content).is_none() {
            let message = format!("Verification failed: {} does not exist or cannot be read", path);
            reporter.fail(&message);
            return CheckResult::failed(REFERENCE_EXISTENCE, message);
        }

        let message = format!("{} exists", path);
        reporter.pass(&message);
        CheckResult::passed(REFERENCE_EXISTENCE, message)
    }

    pub fn check_required_section(&self, content: &str, reporter: &mut dyn Reporter) -> CheckResult {
        if !self.config.flow.check_section_existence {
            return CheckResult::skipped(REQUIRED_SECTION);
        }
        let reference = &self.config.files.reference_file;
        let section = &reference.content_checks.required_section;

        if !content.contains(section.as_str()) {
            let message = format!(
                "Verification failed: section '{}' not found in {}",
                section, reference.path
            );
            reporter.fail(&message);
            return CheckResult::failed(REQUIRED_SECTION, message);
        }

        let message = format!("Found section '{}'", section);
        reporter.pass(&message);
        CheckResult::passed(REQUIRED_SECTION, message)
    }

    pub fn check_required_entries(&self, content: &str, reporter: &mut dyn Reporter) -> CheckResult {
        let reference = &self.config.files.reference_file;
        let checks = &reference.content_checks;
        if !(self.config.flow.check_required_entries && checks.check_entries) {
            return CheckResult::skipped(REQUIRED_ENTRIES);
        }

        let mut missing = Vec::new();
        for entry in &checks.required_entries {
            if !content.contains(entry.as_str()) {
                reporter.warn(&format!("Warning: entry '{}' not found in {}", entry, reference.path));
                missing.push(entry.as_str());
            }
        }

        if !missing.is_empty() {
            let message = "Verification failed: some required entries are missing".to_string();
            reporter.fail(&message);
            return CheckResult::failed(REQUIRED_ENTRIES, message)
                .with_details(format!("missing: {}", missing.join(", ")));
        }

        let message = format!(
            "All required entries are present ({} total)",
            checks.required_entries.len()
        );
        reporter.pass(&message);
        CheckResult::passed(REQUIRED_ENTRIES, message)
    }
}
