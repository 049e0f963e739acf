pub mod error;
pub mod config;
pub mod env;
pub mod github;
pub mod content;
pub mod checks;
pub mod report;
pub mod verifier;

pub use error::{ApiError, DecodeError, Result, VerifyError};
pub use config::{
    AnswerFileConfig, ConfigLoader, ContentChecks, ContentSchema, Encoding, EnvConfig,
    FilesToVerify, ReferenceFileConfig, RepoConfig, VerificationFlow, VerifierConfig,
};
pub use env::{load_credentials, Credentials, EnvSource};
pub use github::{
    ApiHeaders, ApiRequest, ApiResponse, GitHubClient, HttpResponse, HttpTransport,
    MockResponse, MockTransport, ReqwestTransport,
};
pub use content::{decode_content, ContentFetcher};
pub use checks::{CheckResult, CheckStatus, ContentValidator, FileReport};
pub use report::{ConsoleReporter, Diagnostic, Level, RecordingReporter, Reporter};
pub use verifier::{Stage, VerificationReport, Verifier};
