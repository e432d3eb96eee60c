//! Error returned by `InteractionClient` operations.

use live2d_core::ApiError;
use thiserror::Error;

/// Failure of an `InteractionClient` call.
///
/// `Transport` holds the transport's own error untouched, so callers can
/// match on it exactly as if they had called the transport themselves.
#[derive(Debug, Error)]
pub enum ClientError<E>
where
    E: std::error::Error + 'static,
{
    /// Building the request or parsing the response failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(E),
}

impl<E> ClientError<E>
where
    E: std::error::Error + 'static,
{
    pub fn transport(&self) -> Option<&E> {
        match self {
            ClientError::Transport(e) => Some(e),
            ClientError::Api(_) => None,
        }
    }

    /// Take back the transport error, if that is what failed.
    pub fn into_transport(self) -> Option<E> {
        match self {
            ClientError::Transport(e) => Some(e),
            ClientError::Api(_) => None,
        }
    }
}
