//! Wire types for the MCP surface the explorer consumes.
//!
//! Field names follow the MCP JSON shapes (camelCase on the wire). Only the
//! subset needed by an interactive client is modeled: capability listings,
//! tool-call results, and resource reads, plus the JSON-RPC 2.0 envelope.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// JSON-RPC version string sent on every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol version negotiated during `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// A tool as returned by `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name, unique within one listing
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema", default)]
    pub input_schema: JsonValue,
}

/// A directly addressable resource as returned by `resources/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDef {
    /// Resource name
    pub name: String,
    /// Concrete address to read
    pub uri: String,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
}

/// A parametrized resource as returned by `resources/templates/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceTemplateDef {
    /// Template name
    pub name: String,
    /// Address pattern with `{placeholder}` segments
    #[serde(rename = "uriTemplate")]
    pub uri_template: String,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
}

/// One item of a tool result or resource read.
///
/// Content items on the wire are duck-typed: an object may carry a `text`
/// field, a `blob` field, or neither. Blobs are never rendered raw — only
/// their payload size is kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawContent")]
pub enum Content {
    /// Textual content
    Text(String),
    /// Binary content, reduced to its payload size in bytes
    Blob(usize),
    /// Anything else, kept as raw JSON
    Opaque(JsonValue),
}

/// Wire shape a content item is decoded from before tagging.
#[derive(Debug, Deserialize)]
struct RawContent {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    blob: Option<String>,
    #[serde(flatten)]
    rest: JsonValue,
}

impl From<RawContent> for Content {
    fn from(raw: RawContent) -> Self {
        if let Some(text) = raw.text {
            Content::Text(text)
        } else if let Some(blob) = raw.blob {
            Content::Blob(blob.len())
        } else {
            Content::Opaque(raw.rest)
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => f.write_str(text),
            Content::Blob(len) => write!(f, "[Binary data: {} bytes]", len),
            Content::Opaque(value) => f.write_str(&value.to_string()),
        }
    }
}

/// Result of a `tools/call` request.
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolResult {
    /// Content items produced by the tool
    #[serde(default)]
    pub content: Vec<Content>,
    /// Set when the tool reports a failure; not a protocol error
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

/// Result of a `resources/read` request.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadResourceResult {
    /// Content items of the resource
    #[serde(default)]
    pub contents: Vec<Content>,
}

/// Outgoing JSON-RPC 2.0 request or notification.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest {
    /// Always "2.0"
    pub jsonrpc: &'static str,
    /// Request id; absent for notifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Method name, e.g. "tools/list"
    pub method: String,
    /// Method parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonValue>,
}

impl JsonRpcRequest {
    /// Build a request with the given id.
    pub fn new(id: i64, method: &str, params: Option<JsonValue>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: Some(id),
            method: method.to_string(),
            params,
        }
    }

    /// Build a notification (no id, no response expected).
    pub fn notification(method: &str, params: Option<JsonValue>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: None,
            method: method.to_string(),
            params,
        }
    }
}

/// Incoming JSON-RPC 2.0 response.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    /// Id echoed from the request; absent on server notifications
    #[serde(default)]
    pub id: Option<i64>,
    /// Success payload
    #[serde(default)]
    pub result: Option<JsonValue>,
    /// Failure payload
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i64,
    /// Error message
    pub message: String,
}
