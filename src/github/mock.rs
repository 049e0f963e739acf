use std::sync::Mutex;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::json;
use crate::error::TransportFailure;
use super::{ApiRequest, HttpResponse, HttpTransport};

/// GitHub wraps base64 content at 60 columns.
const CONTENT_LINE_WIDTH: usize = 60;

pub fn encode_content(content: &str) -> String {
    let encoded = STANDARD.encode(content);
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / CONTENT_LINE_WIDTH + 1);
    for (i, ch) in encoded.chars().enumerate() {
        if i > 0 && i % CONTENT_LINE_WIDTH == 0 {
            wrapped.push('\n');
        }
        wrapped.push(ch);
    }
    wrapped.push('\n');
    wrapped
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Status { status: u16, body: String },
    Failure(TransportFailure),
}

impl MockResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        MockResponse::Status {
            status,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::json(status, r#"{"message":"error"}"#)
    }

    /// A 200 contents-API payload carrying `content`.
    pub fn file(content: &str) -> Self {
        Self::raw_content(&encode_content(content))
    }

    /// A 200 contents-API payload with an arbitrary `content` field.
    pub fn raw_content(encoded: &str) -> Self {
        let body = json!({
            "type": "file",
            "encoding": "base64",
            "content": encoded,
        });
        Self::json(200, body.to_string())
    }
}

/// Scripted transport keyed by endpoint suffix. Unscripted endpoints answer 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Vec<(String, MockResponse)>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, endpoint: impl Into<String>, response: MockResponse) -> Self {
        self.responses.push((endpoint.into(), response));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    fn lookup(&self, url: &str) -> Option<&MockResponse> {
        self.responses
            .iter()
            .find(|(endpoint, _)| url.ends_with(&format!("/{}", endpoint)))
            .map(|(_, response)| response)
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, request: &ApiRequest) -> std::result::Result<HttpResponse, TransportFailure> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match self.lookup(&request.url) {
            Some(MockResponse::Status { status, body }) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(MockResponse::Failure(failure)) => Err(failure.clone()),
            None => Ok(HttpResponse {
                status: 404,
                body: r#"{"message":"Not Found"}"#.to_string(),
            }),
        }
    }
}
