//! Async host for the Live2D core: builds with `Live2dClient`, sends with a
//! `Transport`, and parses where the operation is typed.

use live2d_core::{
    ClientConfig, ConfigError, HttpResponse, InteractionPayload, InteractionResponse, Live2dClient,
    ModelCommand, TriggerAck,
};
use serde::Serialize;

use crate::error::ClientError;
use crate::transport::{ReqwestTransport, Transport};

/// Client for the Live2D backend.
///
/// Construct one and share it by reference; all methods take `&self` and
/// concurrent calls do not affect each other.
#[derive(Debug, Clone)]
pub struct InteractionClient<T = ReqwestTransport> {
    api: Live2dClient,
    transport: T,
}

impl InteractionClient<ReqwestTransport> {
    /// Client over a fresh `reqwest::Client`.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        Self::with_transport(config, ReqwestTransport::default())
    }
}

impl<T: Transport> InteractionClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ConfigError> {
        Ok(Self {
            api: Live2dClient::new(config)?,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST `payload` to `{base_url}/interaction` and return the response
    /// exactly as the transport delivered it, whatever its status.
    pub async fn post_interaction<P>(&self, payload: &P) -> Result<HttpResponse, ClientError<T::Error>>
    where
        P: Serialize + ?Sized,
    {
        let request = self.api.build_post_interaction(payload)?;
        tracing::debug!(url = %request.url, "posting interaction");
        self.transport.send(request).await.map_err(ClientError::Transport)
    }

    /// Post an interaction and decode the backend's reaction.
    pub async fn interact(
        &self,
        payload: &InteractionPayload,
    ) -> Result<InteractionResponse, ClientError<T::Error>> {
        let response = self.post_interaction(payload).await?;
        Ok(self.api.parse_interaction(response)?)
    }

    /// Ask the backend to relay `command` to every connected front-end.
    pub async fn trigger_action(&self, command: &ModelCommand) -> Result<TriggerAck, ClientError<T::Error>> {
        let request = self.api.build_trigger_action(command)?;
        tracing::debug!(url = %request.url, command_type = %command.command_type, "triggering action");
        let response = self.transport.send(request).await.map_err(ClientError::Transport)?;
        Ok(self.api.parse_trigger_action(response)?)
    }
}
