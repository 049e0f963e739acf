use super::api_error::ApiError;

/// A request that never produced an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub timed_out: bool,
    pub message: String,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timed_out: false,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            timed_out: true,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportFailure {}

#[derive(Debug, Default, Clone)]
pub struct ApiErrorContext {
    pub endpoint: String,
    pub timeout_secs: Option<u64>,
}

impl ApiErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// Classify a non-200 status. Callers handle 200 themselves.
pub fn classify_status(status: u16, context: ApiErrorContext) -> ApiError {
    let endpoint = context.endpoint;
    match status {
        404 => ApiError::NotFound { endpoint },
        401 => ApiError::Unauthorized { endpoint },
        403 => ApiError::Forbidden { endpoint },
        _ => ApiError::Status { endpoint, status },
    }
}

pub fn classify_transport(failure: &TransportFailure, context: ApiErrorContext) -> ApiError {
    match (failure.timed_out, context.timeout_secs) {
        (true, Some(timeout_secs)) => ApiError::Timeout {
            endpoint: context.endpoint,
            timeout_secs,
        },
        _ => ApiError::Transport {
            endpoint: context.endpoint,
            reason: failure.message.clone(),
        },
    }
}

pub fn classify_body_error(error: &serde_json::Error, context: ApiErrorContext) -> ApiError {
    ApiError::MalformedBody {
        endpoint: context.endpoint,
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ApiErrorContext {
        ApiErrorContext::new().with_endpoint("contents/README.md?ref=main")
    }

    #[test]
    fn test_classify_not_found() {
        let err = classify_status(404, ctx());
        assert_eq!(err, ApiError::NotFound { endpoint: "contents/README.md?ref=main".into() });
    }

    #[test]
    fn test_classify_auth_statuses() {
        assert_eq!(classify_status(401, ctx()).error_code(), "UNAUTHORIZED");
        assert_eq!(classify_status(403, ctx()).error_code(), "FORBIDDEN");
    }

    #[test]
    fn test_classify_other_status() {
        let err = classify_status(502, ctx());
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.error_code(), "BAD_STATUS");
    }

    #[test]
    fn test_classify_timeout_with_context() {
        let failure = TransportFailure::timeout("operation timed out");
        let err = classify_transport(&failure, ctx().with_timeout(10));
        assert_eq!(err.error_code(), "TIMEOUT");
    }

    #[test]
    fn test_classify_timeout_without_context_falls_back_to_transport() {
        let failure = TransportFailure::timeout("operation timed out");
        let err = classify_transport(&failure, ctx());
        assert_eq!(
            err,
            ApiError::Transport {
                endpoint: "contents/README.md?ref=main".into(),
                reason: "operation timed out".into(),
            }
        );
    }

    #[test]
    fn test_classify_body_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = classify_body_error(&parse_err, ctx());
        assert_eq!(err.error_code(), "MALFORMED_BODY");
        assert!(err.to_string().starts_with("API call error: contents/README.md?ref=main"));
    }
}
