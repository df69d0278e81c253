//! Error types for the explorer.

use thiserror::Error;

/// Errors surfaced by the explorer client and its interactive loops.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Transport or console I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server sent a payload that is not valid JSON.
    #[error("invalid JSON from server: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a JSON-RPC error object.
    #[error("server error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Human-readable message from the server
        message: String,
    },

    /// Structurally invalid response (e.g. neither result nor error present).
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// The server's output stream closed while a response was pending.
    #[error("server closed the connection")]
    ServerClosed,

    /// The interactive input source reached EOF while a value was required.
    #[error("input closed while a required value was pending")]
    InputClosed,

    /// User input could not be coerced to the declared parameter type.
    ///
    /// Recoverable: the argument builder catches it and re-prompts.
    #[error("invalid input for type {param_type}: {reason}")]
    Coerce {
        /// The declared JSON Schema type
        param_type: String,
        /// Parse failure detail
        reason: String,
    },

    /// The MCP server process could not be launched.
    #[error("failed to spawn server: {0}")]
    Spawn(String),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExplorerError>;
