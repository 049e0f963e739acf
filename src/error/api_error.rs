use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NotFound {
        endpoint: String,
    },

    Unauthorized {
        endpoint: String,
    },

    Forbidden {
        endpoint: String,
    },

    Status {
        endpoint: String,
        status: u16,
    },

    Timeout {
        endpoint: String,
        timeout_secs: u64,
    },

    Transport {
        endpoint: String,
        reason: String,
    },

    MalformedBody {
        endpoint: String,
        reason: String,
    },
}

impl ApiError {
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::NotFound { endpoint }
            | ApiError::Unauthorized { endpoint }
            | ApiError::Forbidden { endpoint }
            | ApiError::Status { endpoint, .. }
            | ApiError::Timeout { endpoint, .. }
            | ApiError::Transport { endpoint, .. }
            | ApiError::MalformedBody { endpoint, .. } => endpoint,
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Timeout { .. }
            | ApiError::Transport { .. }
            | ApiError::MalformedBody { .. } => None,
        }
    }

    /// True when the request never produced a usable HTTP response.
    pub fn is_exception(&self) -> bool {
        self.status().is_none()
    }

    pub fn suggestion(&self) -> String {
        match self {
            ApiError::NotFound { endpoint } => {
                format!(
                    "Verify the resource exists:\n  \
                     • Check the path and branch in '{endpoint}'\n  \
                     • Check the organization name in the env file\n  \
                     • Private repositories answer 404 to tokens without access"
                )
            }

            ApiError::Unauthorized { .. } => {
                "The token was rejected:\n  \
                 • Check the token value in the env file\n  \
                 • Regenerate the token if it has expired".to_string()
            }

            ApiError::Forbidden { .. } => {
                "Access was denied:\n  \
                 • Ensure the token has the 'contents: read' permission\n  \
                 • Check whether the API rate limit has been exhausted".to_string()
            }

            ApiError::Status { status, .. } => {
                format!(
                    "GitHub answered with status {status}:\n  \
                     • Check GitHub status: https://www.githubstatus.com/\n  \
                     • Try again in a few moments"
                )
            }

            ApiError::Timeout { timeout_secs, .. } => {
                format!(
                    "No response within {timeout_secs}s:\n  \
                     • Check your internet connection\n  \
                     • Raise repo.timeout_secs in the config file"
                )
            }

            ApiError::Transport { .. } => {
                "Connection failed:\n  \
                 • Check your internet connection and DNS\n  \
                 • Check proxy settings".to_string()
            }

            ApiError::MalformedBody { .. } => {
                "The response body was not valid JSON:\n  \
                 • Check that the API base URL points at GitHub".to_string()
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Unauthorized { .. } => "UNAUTHORIZED",
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::Status { .. } => "BAD_STATUS",
            ApiError::Timeout { .. } => "TIMEOUT",
            ApiError::Transport { .. } => "TRANSPORT",
            ApiError::MalformedBody { .. } => "MALFORMED_BODY",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { endpoint } => {
                write!(f, "API resource not found: {endpoint} (404)")
            }

            ApiError::Unauthorized { endpoint }
            | ApiError::Forbidden { endpoint }
            | ApiError::Status { endpoint, .. } => {
                let status = self.status().unwrap_or_default();
                write!(f, "API request failed: {endpoint} (status code: {status})")
            }

            ApiError::Timeout { endpoint, timeout_secs } => {
                write!(f, "API call error: {endpoint} (error: request timed out after {timeout_secs}s)")
            }

            ApiError::Transport { endpoint, reason }
            | ApiError::MalformedBody { endpoint, reason } => {
                write!(f, "API call error: {endpoint} (error: {reason})")
            }
        }
    }
}

impl std::error::Error for ApiError {}
