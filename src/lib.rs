//! # mcp-explorer
//!
//! Interactive command-line client for MCP (Model Context Protocol) servers.
//!
//! Connects to a server over stdio (JSON-RPC 2.0, one message per line),
//! discovers its tools, resources, and resource templates, and presents them
//! as an indexed menu. Selecting a tool prompts for each declared parameter
//! with type coercion against the tool's JSON Schema; selecting a resource
//! template prompts for its `{placeholder}` values before the read.
//!
//! ## Usage
//!
//! Point the binary at a server command:
//!
//! ```text
//! mcp-explorer -- npx -y @modelcontextprotocol/server-everything
//! ```
//!
//! ## Library Usage
//!
//! The interactive pieces take an injectable input source, so they can be
//! driven without a terminal:
//!
//! ```no_run
//! use mcp_explorer::{ExplorerSession, McpClient, ScriptedPrompt};
//!
//! # async fn run() -> mcp_explorer::Result<()> {
//! let mut client = McpClient::spawn("my-mcp-server", &[])?;
//! client.initialize().await?;
//!
//! let prompt = ScriptedPrompt::new(["1", "The Matrix", "q"]);
//! let mut session = ExplorerSession::new(client, prompt);
//! session.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod args;
mod client;
mod error;
mod menu;
mod prompt;
mod protocol;
mod session;
mod template;

pub use args::{build_arguments, coerce};
pub use client::{McpClient, ServerInfo};
pub use error::{ExplorerError, Result};
pub use menu::{Choice, Menu, Selection};
pub use prompt::{ConsolePrompt, Prompt, ScriptedPrompt};
pub use protocol::{
    CallToolResult, Content, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ReadResourceResult,
    ResourceDef, ResourceTemplateDef, ToolDef,
};
pub use session::ExplorerSession;
pub use template::{placeholders, resolve, substitute};
