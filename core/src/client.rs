//! Stateless HTTP request builder and response parser for the Live2D API.
//!
//! # Design
//! `Live2dClient` holds only a validated `ClientConfig` and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping the
//! core deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ClientConfig, APPLICATION_JSON, CONTENT_TYPE};
use crate::error::{ApiError, ConfigError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{InteractionResponse, ModelCommand, TriggerAck};

pub const INTERACTION_PATH: &str = "/interaction";
pub const TRIGGER_ACTION_PATH: &str = "/trigger-action";

/// Synchronous, stateless client for the Live2D backend.
#[derive(Debug, Clone)]
pub struct Live2dClient {
    config: ClientConfig,
}

impl Default for Live2dClient {
    /// Client for the local backend at `DEFAULT_BASE_URL`.
    fn default() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }
}

impl Live2dClient {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Self::new(ClientConfig::new(base_url))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// POST `payload` as JSON to `{base_url}/interaction`.
    ///
    /// The payload is opaque: any value serde can turn into JSON is accepted
    /// and its shape is not checked.
    pub fn build_post_interaction<P>(&self, payload: &P) -> Result<HttpRequest, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.build_json_post(INTERACTION_PATH, payload)
    }

    pub fn build_trigger_action(&self, command: &ModelCommand) -> Result<HttpRequest, ApiError> {
        self.build_json_post(TRIGGER_ACTION_PATH, command)
    }

    pub fn parse_interaction(&self, response: HttpResponse) -> Result<InteractionResponse, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_trigger_action(&self, response: HttpResponse) -> Result<TriggerAck, ApiError> {
        parse_json(response, 200)
    }

    fn build_json_post<P>(&self, path: &str, payload: &P) -> Result<HttpRequest, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{path}", self.config.base_url),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    /// Configured headers with `Content-Type` pinned to JSON, first.
    fn json_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())];
        headers.extend(
            self.config
                .default_headers
                .iter()
                .filter(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE))
                .cloned(),
        );
        headers
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_slice(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}
