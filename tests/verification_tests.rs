use ghverify::{
    CheckStatus, EnvSource, Level, MockResponse, MockTransport, RecordingReporter, Stage,
    VerificationReport, Verifier, VerifierConfig,
};
use ghverify::error::TransportFailure;

const ANSWER_ENDPOINT: &str = "contents/ANSWER.md?ref=main";
const README_ENDPOINT: &str = "contents/README.md?ref=main";

const README: &str = "# Voxel Engine Docs\n\n\
    ## Voxel Engine Implementation\n\n\
    - C++ Voxel Engine Fundamentals\n\
    - Vulkan-based Voxel Rendering\n";

fn full_env() -> EnvSource {
    EnvSource::from_pairs([("MCP_GITHUB_TOKEN", "ghp_integration"), ("GITHUB_EVAL_ORG", "acme")])
}

fn passing_transport() -> MockTransport {
    MockTransport::new()
        .with_response(ANSWER_ENDPOINT, MockResponse::file("2023-11-15\n"))
        .with_response(README_ENDPOINT, MockResponse::file(README))
}

async fn verify(
    config: &VerifierConfig,
    transport: &MockTransport,
    env: &EnvSource,
) -> (VerificationReport, RecordingReporter) {
    let verifier = Verifier::new(config, transport).unwrap();
    let mut reporter = RecordingReporter::new();
    let report = verifier.run(env, &mut reporter).await;
    (report, reporter)
}

#[tokio::test]
async fn test_missing_token_fails_without_requests() {
    let config = VerifierConfig::default();
    let transport = passing_transport();
    let env = EnvSource::from_pairs([("GITHUB_EVAL_ORG", "acme")]);

    let (report, reporter) = verify(&config, &transport, &env).await;

    assert!(!report.success);
    assert_eq!(report.failed_stage, Some(Stage::LoadEnv));
    assert_eq!(transport.request_count(), 0);
    assert!(reporter.contains("MCP_GITHUB_TOKEN not found"));
}

#[tokio::test]
async fn test_missing_org_fails_without_requests() {
    let config = VerifierConfig::default();
    let transport = passing_transport();
    let env = EnvSource::from_pairs([("MCP_GITHUB_TOKEN", "ghp_integration")]);

    let (report, reporter) = verify(&config, &transport, &env).await;

    assert!(!report.success);
    assert_eq!(transport.request_count(), 0);
    assert!(reporter.contains("GITHUB_EVAL_ORG not found"));
    assert!(report.organization.is_none());
}

#[tokio::test]
async fn test_both_credentials_missing() {
    let config = VerifierConfig::default();
    let transport = passing_transport();
    let env = EnvSource::from_pairs(Vec::<(&str, &str)>::new());

    let (report, reporter) = verify(&config, &transport, &env).await;

    assert_eq!(report.final_stage(), Stage::LoadEnv);
    assert_eq!(transport.request_count(), 0);
    assert_eq!(
        reporter.error_lines(),
        vec![
            "✗ Environment variable MCP_GITHUB_TOKEN not found (check .mcp_env)",
            "✗ Environment variable GITHUB_EVAL_ORG not found (check .mcp_env)",
            "✗ Environment configuration incomplete, aborting verification",
        ]
    );
}

#[tokio::test]
async fn test_answer_not_found() {
    let config = VerifierConfig::default();
    let transport = MockTransport::new().with_response(README_ENDPOINT, MockResponse::file(README));

    let (report, reporter) = verify(&config, &transport, &full_env()).await;

    assert!(!report.success);
    assert_eq!(report.failed_stage, Some(Stage::ValidateAnswer));
    assert_eq!(transport.request_count(), 1);
    assert_eq!(
        reporter.error_lines(),
        vec![
            "⚠ API resource not found: contents/ANSWER.md?ref=main (404)",
            "✗ File 'ANSWER.md' not found on branch 'main'",
            "✗ Verification failed: ANSWER.md does not exist or cannot be read",
            "✗ Answer file verification failed",
        ]
    );
}

#[tokio::test]
async fn test_correct_answer_passes_format_and_value() {
    let config = VerifierConfig::default();
    let transport = passing_transport();

    let (report, _) = verify(&config, &transport, &full_env()).await;

    let answer = report.answer.expect("answer checks ran");
    assert_eq!(answer.get("answer_format").unwrap().status, CheckStatus::Passed);
    assert_eq!(answer.get("answer_value").unwrap().status, CheckStatus::Passed);
}

#[tokio::test]
async fn test_wrong_date_reports_mismatch() {
    let config = VerifierConfig::default();
    let transport = MockTransport::new()
        .with_response(ANSWER_ENDPOINT, MockResponse::file("2023-11-16"))
        .with_response(README_ENDPOINT, MockResponse::file(README));

    let (report, reporter) = verify(&config, &transport, &full_env()).await;

    assert!(!report.success);
    let answer = report.answer.unwrap();
    assert_eq!(answer.get("answer_format").unwrap().status, CheckStatus::Passed);
    assert_eq!(answer.get("answer_value").unwrap().status, CheckStatus::Failed);
    assert!(reporter.contains("expected: 2023-11-15, actual: 2023-11-16"));
}

#[tokio::test]
async fn test_full_pass() {
    let config = VerifierConfig::default();
    let transport = passing_transport();

    let (report, reporter) = verify(&config, &transport, &full_env()).await;

    assert!(report.success);
    assert_eq!(report.final_stage(), Stage::Done);
    assert_eq!(report.organization.as_deref(), Some("acme"));
    assert!(report.reference.unwrap().all_passed());
    assert!(reporter.error_lines().is_empty());
    assert_eq!(transport.request_count(), 2);
    assert!(reporter.contains("Repository: acme/voxel-engine-docs"));
    assert!(reporter.contains("Branch: main"));
    assert!(reporter.contains("Answer file: ANSWER.md (value: 2023-11-15)"));
    assert!(reporter.contains("Reference file: README.md (section: ## Voxel Engine Implementation)"));
}

#[tokio::test]
async fn test_requests_carry_headers() {
    let config = VerifierConfig::default();
    let transport = passing_transport();

    verify(&config, &transport, &full_env()).await;

    for request in transport.requests() {
        assert_eq!(request.headers.authorization, "Bearer ghp_integration");
        assert_eq!(request.headers.accept, "application/vnd.github.v3+json");
        assert_eq!(request.headers.user_agent, "voxel-engine-verifier");
        assert!(request.url.starts_with("https://api.github.com/repos/acme/voxel-engine-docs/contents/"));
    }
}

#[tokio::test]
async fn test_missing_entry_fails_section_still_passes() {
    let config = VerifierConfig::default();
    let readme = "## Voxel Engine Implementation\n- Vulkan-based Voxel Rendering\n";
    let transport = MockTransport::new()
        .with_response(ANSWER_ENDPOINT, MockResponse::file("2023-11-15"))
        .with_response(README_ENDPOINT, MockResponse::file(readme));

    let (report, reporter) = verify(&config, &transport, &full_env()).await;

    assert!(!report.success);
    assert_eq!(report.failed_stage, Some(Stage::ValidateReference));
    let reference = report.reference.unwrap();
    assert_eq!(reference.get("required_section").unwrap().status, CheckStatus::Passed);
    assert_eq!(reference.get("required_entries").unwrap().status, CheckStatus::Failed);
    assert_eq!(reporter.count(Level::Warn), 1);
    assert!(reporter.contains("entry 'C++ Voxel Engine Fundamentals' not found in README.md"));
    assert!(reporter.contains("Reference file verification failed"));
}

#[tokio::test]
async fn test_reference_server_error() {
    let config = VerifierConfig::default();
    let transport = MockTransport::new()
        .with_response(ANSWER_ENDPOINT, MockResponse::file("2023-11-15"))
        .with_response(README_ENDPOINT, MockResponse::status(503));

    let (report, reporter) = verify(&config, &transport, &full_env()).await;

    assert_eq!(report.failed_stage, Some(Stage::ValidateReference));
    assert!(reporter.contains("API request failed: contents/README.md?ref=main (status code: 503)"));
    assert_eq!(report.reference.unwrap().blocked_count(), 2);
}

#[tokio::test]
async fn test_transport_exception_on_answer() {
    let config = VerifierConfig::default();
    let transport = MockTransport::new().with_response(
        ANSWER_ENDPOINT,
        MockResponse::Failure(TransportFailure::timeout("operation timed out")),
    );

    let (report, reporter) = verify(&config, &transport, &full_env()).await;

    assert!(!report.success);
    assert!(reporter.contains("API call error: contents/ANSWER.md?ref=main (error: request timed out after 10s)"));
}

#[tokio::test]
async fn test_undecodable_answer_is_failure_not_crash() {
    let config = VerifierConfig::default();
    let transport = MockTransport::new()
        .with_response(ANSWER_ENDPOINT, MockResponse::raw_content("@@not-base64@@"));

    let (report, reporter) = verify(&config, &transport, &full_env()).await;

    assert_eq!(report.failed_stage, Some(Stage::ValidateAnswer));
    assert!(reporter.contains("Failed to decode file 'ANSWER.md'"));
}

#[tokio::test]
async fn test_disabled_reference_checks_pass() {
    let mut config = VerifierConfig::default();
    config.flow.check_section_existence = false;
    config.flow.check_required_entries = false;
    let transport = MockTransport::new()
        .with_response(ANSWER_ENDPOINT, MockResponse::file("2023-11-15"))
        .with_response(README_ENDPOINT, MockResponse::file("unrelated readme"));

    let (report, _) = verify(&config, &transport, &full_env()).await;

    assert!(report.success);
    assert_eq!(report.reference.unwrap().skipped_count(), 2);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let config = VerifierConfig::default();
    let readme = "## Voxel Engine Implementation\n";
    let transport = MockTransport::new()
        .with_response(ANSWER_ENDPOINT, MockResponse::file("2023-11-15"))
        .with_response(README_ENDPOINT, MockResponse::file(readme));

    let (first, first_reporter) = verify(&config, &transport, &full_env()).await;
    let (second, second_reporter) = verify(&config, &transport, &full_env()).await;

    assert_eq!(first.success, second.success);
    assert_eq!(first.answer, second.answer);
    assert_eq!(first.reference, second.reference);
    assert_eq!(first_reporter.diagnostics(), second_reporter.diagnostics());
}

#[tokio::test]
async fn test_successful_run_output_order() {
    let config = VerifierConfig::default();
    let transport = passing_transport();

    let (_, reporter) = verify(&config, &transport, &full_env()).await;

    let steps: Vec<&str> = reporter
        .diagnostics()
        .iter()
        .filter(|d| d.level == Level::Step)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(
        steps,
        vec![
            "[Step 1/3] Loading environment configuration...",
            "[Step 2/3] Verifying answer file...",
            "[Step 3/3] Verifying reference file...",
        ]
    );
    assert_eq!(reporter.count(Level::Pass), 8);
}
