//! Node-level error type.

use thiserror::Error;

/// Errors returned by a node's `execute` method.
///
/// All variants abort the current execution batch immediately; the host
/// never retries a node error or downgrades it to a warning.
#[derive(Debug, Error, Clone)]
pub enum NodeError {
    /// Configuration, authentication, or parameter-validation failure.
    /// The message is shown to the user verbatim.
    #[error("{0}")]
    Application(String),

    /// The node was asked for a resource or operation it does not define.
    #[error("operation error: {0}")]
    Operation(String),

    /// A provider API call failed while processing an item. `message` is
    /// user-facing; `description` carries the underlying error's rendering.
    #[error("{message}")]
    Api { message: String, description: String },

    /// The HTTP transport itself failed (connection error, non-success
    /// status, unreadable body).
    #[error("transport error: {0}")]
    Transport(String),
}
