use async_trait::async_trait;
use crate::error::{Result, TransportFailure, VerifyError};
use super::{ApiRequest, HttpResponse, HttpTransport};

#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| VerifyError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }
}

fn to_failure(error: reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::timeout(error.to_string())
    } else {
        TransportFailure::new(error.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &ApiRequest) -> std::result::Result<HttpResponse, TransportFailure> {
        let mut builder = self.client.get(&request.url).timeout(request.timeout);
        for (name, value) in request.headers.pairs() {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(to_failure)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(to_failure)?;

        Ok(HttpResponse { status, body })
    }
}
