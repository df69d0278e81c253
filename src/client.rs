//! Line-delimited JSON-RPC 2.0 client over stdio.
//!
//! The explorer treats the MCP session as a plain request/response client:
//! one request out, one matching response back, correlated by id. The server
//! runs as a child process wired through its stdin/stdout, the transport
//! every MCP server here speaks. No retries, no translation — server errors
//! propagate unchanged.

use std::process::Stdio;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};

use crate::error::{ExplorerError, Result};
use crate::protocol::{
    CallToolResult, JsonRpcRequest, JsonRpcResponse, ReadResourceResult, ResourceDef,
    ResourceTemplateDef, ToolDef, PROTOCOL_VERSION,
};

/// Server identity reported during the `initialize` handshake.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// MCP client over a pair of byte streams.
///
/// The session is a scoped resource: `spawn` acquires the server child
/// process and dropping the client releases it (the child is killed on
/// drop), whether the loop exits normally, errors out, or is interrupted.
pub struct McpClient {
    reader: Box<dyn AsyncBufRead + Unpin + Send>,
    writer: Box<dyn AsyncWrite + Unpin + Send>,
    next_id: i64,
    _child: Option<Child>,
}

impl McpClient {
    /// Launch an MCP server as a child process and connect over its stdio.
    pub fn spawn(command: &str, args: &[String]) -> Result<Self> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExplorerError::Spawn(format!("{}: {}", command, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ExplorerError::Spawn("child stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExplorerError::Spawn("child stdout unavailable".to_string()))?;

        Ok(Self {
            reader: Box::new(BufReader::new(stdout)),
            writer: Box::new(stdin),
            next_id: 0,
            _child: Some(child),
        })
    }

    /// Connect over arbitrary streams. Used by tests with in-memory pipes.
    pub fn with_streams<R, W>(reader: R, writer: W) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        Self {
            reader: Box::new(reader),
            writer: Box::new(writer),
            next_id: 0,
            _child: None,
        }
    }

    /// Perform the MCP handshake and announce readiness.
    pub async fn initialize(&mut self) -> Result<Option<ServerInfo>> {
        let result = self
            .request(
                "initialize",
                Some(serde_json::json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                })),
            )
            .await?;

        self.notify("notifications/initialized", None).await?;

        let info = result.get("serverInfo").map(|si| ServerInfo {
            name: si
                .get("name")
                .and_then(JsonValue::as_str)
                .unwrap_or("unknown")
                .to_string(),
            version: si
                .get("version")
                .and_then(JsonValue::as_str)
                .unwrap_or("unknown")
                .to_string(),
        });
        Ok(info)
    }

    /// Fetch all three capability collections, fresh from the server.
    pub async fn list_capabilities(
        &mut self,
    ) -> Result<(Vec<ToolDef>, Vec<ResourceDef>, Vec<ResourceTemplateDef>)> {
        let tools = self.list_tools().await?;
        let resources = self.list_resources().await?;
        let templates = self.list_resource_templates().await?;
        Ok((tools, resources, templates))
    }

    /// List the server's tools.
    pub async fn list_tools(&mut self) -> Result<Vec<ToolDef>> {
        let result = self.request("tools/list", None).await?;
        list_field(result, "tools")
    }

    /// List the server's direct resources.
    pub async fn list_resources(&mut self) -> Result<Vec<ResourceDef>> {
        let result = self.request("resources/list", None).await?;
        list_field(result, "resources")
    }

    /// List the server's resource templates.
    pub async fn list_resource_templates(&mut self) -> Result<Vec<ResourceTemplateDef>> {
        let result = self.request("resources/templates/list", None).await?;
        list_field(result, "resourceTemplates")
    }

    /// Invoke a tool with the given arguments.
    pub async fn call_tool(
        &mut self,
        name: &str,
        arguments: serde_json::Map<String, JsonValue>,
    ) -> Result<CallToolResult> {
        let result = self
            .request(
                "tools/call",
                Some(serde_json::json!({
                    "name": name,
                    "arguments": arguments,
                })),
            )
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Read a resource by concrete URI.
    pub async fn read_resource(&mut self, uri: &str) -> Result<ReadResourceResult> {
        let result = self
            .request("resources/read", Some(serde_json::json!({ "uri": uri })))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Send one request and wait for the response with the matching id.
    ///
    /// Lines that are not the awaited response (server notifications, stray
    /// messages) are skipped.
    async fn request(&mut self, method: &str, params: Option<JsonValue>) -> Result<JsonValue> {
        self.next_id += 1;
        let id = self.next_id;
        tracing::debug!(method, id, "sending request");

        self.write_message(&JsonRpcRequest::new(id, method, params))
            .await?;

        loop {
            let mut line = String::new();
            let n = self.reader.read_line(&mut line).await?;
            if n == 0 {
                return Err(ExplorerError::ServerClosed);
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let response: JsonRpcResponse = serde_json::from_str(trimmed)?;
            match response.id {
                Some(rid) if rid == id => {
                    if let Some(err) = response.error {
                        return Err(ExplorerError::Rpc {
                            code: err.code,
                            message: err.message,
                        });
                    }
                    return response.result.ok_or_else(|| {
                        ExplorerError::Protocol("response carries neither result nor error".into())
                    });
                }
                _ => {
                    tracing::debug!(method, "skipping unsolicited message");
                }
            }
        }
    }

    /// Send a notification. No response is expected.
    async fn notify(&mut self, method: &str, params: Option<JsonValue>) -> Result<()> {
        self.write_message(&JsonRpcRequest::notification(method, params))
            .await
    }

    async fn write_message(&mut self, message: &JsonRpcRequest) -> Result<()> {
        let mut encoded = serde_json::to_string(message)?;
        encoded.push('\n');
        self.writer.write_all(encoded.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// Pull an array field out of a listing result. A missing field is an empty
/// listing, not an error.
fn list_field<T: DeserializeOwned>(mut result: JsonValue, key: &str) -> Result<Vec<T>> {
    match result.get_mut(key) {
        Some(field) => Ok(serde_json::from_value(field.take())?),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};

    /// Drive a scripted server on the far end of a duplex pipe: for each
    /// incoming request, reply with the canned result under the same id.
    fn scripted_server(stream: DuplexStream, results: Vec<JsonValue>) {
        tokio::spawn(async move {
            let (read, mut write) = tokio::io::split(stream);
            let mut lines = BufReader::new(read).lines();
            let mut results = results.into_iter();
            while let Ok(Some(line)) = lines.next_line().await {
                let request: JsonValue = serde_json::from_str(&line).unwrap();
                let Some(id) = request.get("id").cloned() else {
                    continue; // notification
                };
                let result = results.next().unwrap_or(JsonValue::Null);
                let response =
                    serde_json::json!({ "jsonrpc": "2.0", "id": id, "result": result });
                let mut encoded = response.to_string();
                encoded.push('\n');
                write.write_all(encoded.as_bytes()).await.unwrap();
            }
        });
    }

    fn connect(results: Vec<JsonValue>) -> McpClient {
        let (local, remote) = tokio::io::duplex(64 * 1024);
        scripted_server(remote, results);
        let (read, write) = tokio::io::split(local);
        McpClient::with_streams(BufReader::new(read), write)
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let mut client = connect(vec![serde_json::json!({
            "protocolVersion": "2024-11-05",
            "serverInfo": { "name": "movies", "version": "1.2.0" }
        })]);

        let info = client.initialize().await.unwrap().unwrap();
        assert_eq!(info.name, "movies");
        assert_eq!(info.version, "1.2.0");
    }

    #[tokio::test]
    async fn listings_tolerate_missing_fields() {
        let mut client = connect(vec![
            serde_json::json!({ "tools": [
                { "name": "search", "inputSchema": { "type": "object" } }
            ]}),
            serde_json::json!({}),
        ]);

        let tools = client.list_tools().await.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "search");

        let resources = client.list_resources().await.unwrap();
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn call_tool_surfaces_is_error() {
        let mut client = connect(vec![serde_json::json!({
            "content": [{ "type": "text", "text": "boom" }],
            "isError": true
        })]);

        let result = client
            .call_tool("explode", serde_json::Map::new())
            .await
            .unwrap();
        assert!(result.is_error);
        assert_eq!(result.content[0].to_string(), "boom");
    }

    #[tokio::test]
    async fn rpc_error_objects_become_errors() {
        let (local, remote) = tokio::io::duplex(64 * 1024);
        tokio::spawn(async move {
            let (read, mut write) = tokio::io::split(remote);
            let mut lines = BufReader::new(read).lines();
            let line = lines.next_line().await.unwrap().unwrap();
            let request: JsonValue = serde_json::from_str(&line).unwrap();
            let response = serde_json::json!({
                "jsonrpc": "2.0",
                "id": request["id"],
                "error": { "code": -32601, "message": "method not found" }
            });
            write
                .write_all(format!("{}\n", response).as_bytes())
                .await
                .unwrap();
        });
        let (read, write) = tokio::io::split(local);
        let mut client = McpClient::with_streams(BufReader::new(read), write);

        let err = client.list_tools().await.unwrap_err();
        match err {
            ExplorerError::Rpc { code, message } => {
                assert_eq!(code, -32601);
                assert_eq!(message, "method not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unsolicited_messages_are_skipped() {
        let (local, remote) = tokio::io::duplex(64 * 1024);
        tokio::spawn(async move {
            let (read, mut write) = tokio::io::split(remote);
            let mut lines = BufReader::new(read).lines();
            let line = lines.next_line().await.unwrap().unwrap();
            let request: JsonValue = serde_json::from_str(&line).unwrap();
            // A server-initiated notification lands before the real response.
            let noise = serde_json::json!({
                "jsonrpc": "2.0",
                "method": "notifications/progress",
                "params": { "progress": 1 }
            });
            let response = serde_json::json!({
                "jsonrpc": "2.0",
                "id": request["id"],
                "result": { "tools": [] }
            });
            write
                .write_all(format!("{}\n{}\n", noise, response).as_bytes())
                .await
                .unwrap();
        });
        let (read, write) = tokio::io::split(local);
        let mut client = McpClient::with_streams(BufReader::new(read), write);

        let tools = client.list_tools().await.unwrap();
        assert!(tools.is_empty());
    }
}
