mod client;
mod mock;
mod transport;

use std::time::Duration;
use async_trait::async_trait;
use crate::config::{GITHUB_API_BASE, USER_AGENT};
use crate::env::redact_token;
use crate::error::TransportFailure;

pub use client::{ApiResponse, GitHubClient};
pub use mock::{encode_content, MockResponse, MockTransport};
pub use transport::ReqwestTransport;

#[derive(Clone, PartialEq, Eq)]
pub struct ApiHeaders {
    pub authorization: String,
    pub accept: String,
    pub user_agent: String,
}

impl ApiHeaders {
    pub fn build(token: &str, api_version: &str) -> Self {
        Self {
            authorization: format!("Bearer {}", token),
            accept: format!("application/vnd.github.{}+json", api_version),
            user_agent: USER_AGENT.to_string(),
        }
    }

    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            ("Authorization", self.authorization.as_str()),
            ("Accept", self.accept.as_str()),
            ("User-Agent", self.user_agent.as_str()),
        ]
    }
}

impl std::fmt::Debug for ApiHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = self.authorization.trim_start_matches("Bearer ");
        f.debug_struct("ApiHeaders")
            .field("authorization", &format!("Bearer {}", redact_token(token)))
            .field("accept", &self.accept)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

pub fn api_url(organization: &str, repo_name: &str, endpoint: &str) -> String {
    format!("{}/repos/{}/{}/{}", GITHUB_API_BASE, organization, repo_name, endpoint)
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub url: String,
    pub headers: ApiHeaders,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// One blocking-style GET per call. No retries.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: &ApiRequest) -> std::result::Result<HttpResponse, TransportFailure>;
}
