//! Error types for the Live2D API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a 404 almost always means the
//! base address points at the wrong prefix. All other unexpected statuses
//! land in `Http` with the raw status code and body for debugging.

use thiserror::Error;

/// Errors returned by `Live2dClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the one the operation expects.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Reasons a `ClientConfig` is rejected at client construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base URL is empty")]
    EmptyBaseUrl,

    #[error("base URL must start with http:// or https://: {0}")]
    UnsupportedScheme(String),

    #[error("base URL {url} does not parse: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL has no host: {0}")]
    MissingHost(String),

    #[error("base URL must not carry a query or fragment: {0}")]
    QueryOrFragment(String),

    #[error("invalid header name: {0:?}")]
    InvalidHeaderName(String),

    #[error("header {0} has a value that is not a valid HTTP header value")]
    InvalidHeaderValue(String),
}
