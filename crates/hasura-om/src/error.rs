use hasura_om_core::DocumentBuildError;
use hasura_om_core::FragmentBuildError;
use hasura_om_core::TableBuildError;
use thiserror::Error;

/// Errors surfaced by the client layer.
///
/// Document-building errors from [`hasura_om_core`] convert transparently so
/// a single error type covers the whole request lifecycle.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid client configuration: {message}")]
    Configuration { message: String },

    #[error("the subscription connection was lost: {message}")]
    ConnectionLost { message: String },

    #[error(transparent)]
    Document(#[from] DocumentBuildError),

    #[error(transparent)]
    Fragment(#[from] FragmentBuildError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("the server rejected the operation: {message}")]
    Server { message: String },

    #[error("the subscription channel is closed")]
    SubscriptionClosed,

    #[error(transparent)]
    Table(#[from] TableBuildError),

    #[error("no table named `{name}` has been registered")]
    TableNotFound { name: String },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("websocket failure: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}
