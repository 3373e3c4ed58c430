//! Error types for the gateway client.

use harbor_cache::StructureError;
use thiserror::Error;

/// Errors that can occur while handling gateway dispatches.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A structure could not be built from its raw record.
    #[error("structure error: {0}")]
    Structure(#[from] StructureError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A dispatch body did not match its event.
    #[error("invalid {event} payload: {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}
