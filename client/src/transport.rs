//! Executes `HttpRequest` values built by `live2d_core`.
//!
//! # Design
//! `Transport` is the seam between the I/O-free core and the network. The
//! client never looks inside a transport error; it hands it back to the
//! caller as-is. Non-2xx statuses are responses, not errors, and header
//! values and body are handed over as the bytes that arrived.

use async_trait::async_trait;
use live2d_core::{HttpMethod, HttpRequest, HttpResponse};

/// Sends one HTTP request and returns the response as plain data.
#[async_trait]
pub trait Transport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error>;
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Error = reqwest::Error;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        let method = match request.method {
            HttpMethod::Post => reqwest::Method::POST,
        };
        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.as_bytes().to_vec()))
            .collect();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(url = %request.url, status, "live2d response");

        Ok(HttpResponse { status, headers, body })
    }
}
