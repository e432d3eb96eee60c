//! Async client for the Live2D backend.
//!
//! # Overview
//! Hosts `live2d_core`: requests are built as plain data by the core, then
//! executed by a [`Transport`]. The default transport is reqwest.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use live2d_client::{ClientConfig, InteractionClient};
//!
//! // LIVE2D_BASE_URL overrides http://localhost:8000/api/v1/live2d
//! let client = InteractionClient::new(ClientConfig::from_env())?;
//! let response = client
//!     .post_interaction(&serde_json::json!({ "action": "tap", "x": 10, "y": 20 }))
//!     .await?;
//! println!("backend answered {}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod transport;

pub use client::InteractionClient;
pub use error::ClientError;
pub use live2d_core::{
    ApiError, BackendAction, ClientConfig, ConfigError, HttpResponse, InteractionPayload, InteractionResponse,
    ModelCommand, ModelEvent, MotionPriority, TriggerAck,
};
pub use transport::{ReqwestTransport, Transport};
