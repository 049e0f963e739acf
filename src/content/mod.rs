use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use tracing::debug;
use crate::config::Encoding;
use crate::error::DecodeError;
use crate::github::{ApiHeaders, GitHubClient};
use crate::report::Reporter;

/// Decodes a contents-API `content` field. GitHub splits it across lines.
/// Characters outside the base64 alphabet are discarded before decoding.
pub fn decode_content(encoded: &str, encoding: Encoding) -> Result<String, DecodeError> {
    let compact: String = encoded.chars().filter(|c| is_base64_char(*c)).collect();
    let bytes = STANDARD.decode(compact)?;

    match encoding {
        Encoding::Utf8 => Ok(String::from_utf8(bytes)?),
    }
}

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=')
}

/// Pulls the encoded payload out of a contents-API body. A missing field reads as empty.
fn content_field(body: &Value) -> Result<&str, DecodeError> {
    let object = body
        .as_object()
        .ok_or_else(|| DecodeError::Shape("expected a file object".to_string()))?;

    match object.get("content") {
        None => Ok(""),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(DecodeError::Shape(format!("'content' is not a string: {}", other))),
    }
}

fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

pub struct ContentFetcher<'a> {
    client: GitHubClient<'a>,
}

impl<'a> ContentFetcher<'a> {
    pub fn new(client: GitHubClient<'a>) -> Self {
        Self { client }
    }

    /// Fetches `path` at `git_ref`, or at the configured target branch.
    /// Every failure is reported and collapses to `None`.
    pub async fn get_file_content(
        &self,
        path: &str,
        headers: &ApiHeaders,
        organization: &str,
        git_ref: Option<&str>,
        encoding: Encoding,
        reporter: &mut dyn Reporter,
    ) -> Option<String> {
        let branch = git_ref.unwrap_or(&self.client.repo().target_branch);
        let endpoint = format!("contents/{}?ref={}", path, branch);

        let response = self
            .client
            .call_endpoint(&endpoint, headers, organization, reporter)
            .await;

        let body = match response.body {
            Some(body) if response.success && !is_empty_body(&body) => body,
            _ => {
                reporter.fail(&format!("File '{}' not found on branch '{}'", path, branch));
                return None;
            }
        };

        match content_field(&body).and_then(|encoded| decode_content(encoded, encoding)) {
            Ok(text) => {
                debug!("Decoded {} ({} bytes)", path, text.len());
                Some(text)
            }
            Err(e) => {
                reporter.fail(&format!("Failed to decode file '{}' (error: {})", path, e));
                None
            }
        }
    }
}
