use std::time::Duration;
use serde_json::Value;
use tracing::debug;
use crate::config::RepoConfig;
use crate::error::{
    classify_body_error, classify_status, classify_transport, ApiError, ApiErrorContext,
};
use crate::report::Reporter;
use super::{api_url, ApiHeaders, ApiRequest, HttpTransport};

/// Outcome of one endpoint call. `body` is only set on success.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub body: Option<Value>,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self {
            success: true,
            body: Some(body),
        }
    }

    fn failed() -> Self {
        Self {
            success: false,
            body: None,
        }
    }
}

pub struct GitHubClient<'a> {
    transport: &'a dyn HttpTransport,
    repo: &'a RepoConfig,
}

impl<'a> GitHubClient<'a> {
    pub fn new(transport: &'a dyn HttpTransport, repo: &'a RepoConfig) -> Self {
        Self { transport, repo }
    }

    pub fn repo(&self) -> &RepoConfig {
        self.repo
    }

    /// GET `/repos/{org}/{repo}/{endpoint}`, collapsing every failure to an absent body.
    pub async fn call_endpoint(
        &self,
        endpoint: &str,
        headers: &ApiHeaders,
        organization: &str,
        reporter: &mut dyn Reporter,
    ) -> ApiResponse {
        match self.fetch_json(endpoint, headers, organization).await {
            Ok(body) => ApiResponse::ok(body),
            Err(err) => {
                match &err {
                    ApiError::NotFound { .. } => reporter.warn(&err.to_string()),
                    _ => reporter.fail(&err.to_string()),
                }
                debug!(code = err.error_code(), endpoint = err.endpoint(), "{}", err.suggestion());
                ApiResponse::failed()
            }
        }
    }

    async fn fetch_json(
        &self,
        endpoint: &str,
        headers: &ApiHeaders,
        organization: &str,
    ) -> std::result::Result<Value, ApiError> {
        let request = ApiRequest {
            url: api_url(organization, &self.repo.repo_name, endpoint),
            headers: headers.clone(),
            timeout: Duration::from_secs(self.repo.timeout_secs),
        };
        let context = ApiErrorContext::new()
            .with_endpoint(endpoint)
            .with_timeout(self.repo.timeout_secs);

        debug!("GET {}", request.url);

        let response = self
            .transport
            .get(&request)
            .await
            .map_err(|e| classify_transport(&e, context.clone()))?;

        debug!("{} -> {}", endpoint, response.status);

        if response.status != 200 {
            return Err(classify_status(response.status, context));
        }

        serde_json::from_str(&response.body).map_err(|e| classify_body_error(&e, context))
    }
}
