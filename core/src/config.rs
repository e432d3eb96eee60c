//! Client configuration for the Live2D backend.
//!
//! # Design
//! `ClientConfig` is plain data. It is checked once, when a `Live2dClient`
//! is constructed, and the client owns it immutably from then on.

use http::{HeaderName, HeaderValue};
use url::{ParseError, Url};

use crate::error::ConfigError;

/// Base address of a locally running Live2D backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1/live2d";

/// Environment variable consulted by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "LIVE2D_BASE_URL";

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Where the backend lives and which headers every request carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root URL under which the backend's endpoints are reachable, e.g.
    /// `http://localhost:8000/api/v1/live2d`. A trailing `/` is ignored.
    pub base_url: String,

    /// Headers attached to every request, in order.
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
        }
    }
}

impl ClientConfig {
    /// Default headers with a custom base address.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Read the base address from `LIVE2D_BASE_URL`, falling back to
    /// [`DEFAULT_BASE_URL`] when it is unset or blank.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Check the config and return it with the base URL normalized.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        validate_base_url(&base_url)?;
        for (name, value) in &self.default_headers {
            validate_header(name, value)?;
        }
        Ok(Self {
            base_url,
            default_headers: self.default_headers,
        })
    }
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(ParseError::EmptyHost) => return Err(ConfigError::MissingHost(raw.to_string())),
        Err(ParseError::RelativeUrlWithoutBase) => {
            return Err(ConfigError::UnsupportedScheme(raw.to_string()))
        }
        Err(source) => {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw.to_string(),
                source,
            })
        }
    };
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(raw.to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::MissingHost(raw.to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::QueryOrFragment(raw.to_string()));
    }
    Ok(())
}

fn validate_header(name: &str, value: &str) -> Result<(), ConfigError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| ConfigError::InvalidHeaderName(name.to_string()))?;
    HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeaderValue(name.to_string()))?;
    Ok(())
}
