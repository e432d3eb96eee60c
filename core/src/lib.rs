//! Synchronous API client core for the Live2D backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `Live2dClient` is stateless; it holds only its validated `ClientConfig`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `build_post_interaction` accepts any `Serialize` payload and never
//!   inspects it; typed DTOs are offered for callers that want them.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::Live2dClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    BackendAction, InteractionPayload, InteractionResponse, ModelCommand, ModelEvent, MotionPriority,
    TriggerAck,
};
