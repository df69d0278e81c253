//! mcp-explorer binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mcp_explorer::{ConsolePrompt, ExplorerSession, McpClient};

/// Interactive command-line client for exploring MCP servers.
#[derive(Parser)]
#[command(name = "mcp-explorer", version, about)]
struct Cli {
    /// Command that launches the MCP server (speaks JSON-RPC on stdio)
    command: String,

    /// Arguments passed to the server command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        eprintln!("\nMake sure the MCP server command is correct and the server speaks JSON-RPC over stdio.");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> mcp_explorer::Result<()> {
    println!("{}", "=".repeat(60));
    println!("MCP Explorer - Interactive Tool Executor");
    println!("{}", "=".repeat(60));

    println!("\nConnecting to MCP server: {} {}", cli.command, cli.args.join(" "));

    // Connection and handshake failures here are fatal; everything after
    // this point is handled inside the loop.
    let mut client = McpClient::spawn(&cli.command, &cli.args)?;
    let info = client.initialize().await?;

    match info {
        Some(info) => println!("\nConnected! Server: {} v{}", info.name, info.version),
        None => println!("\nConnected!"),
    }

    let mut session = ExplorerSession::new(client, ConsolePrompt);

    // The loop runs on its own task: console reads block the thread doing
    // them, so ctrl_c must be polled elsewhere for an interrupt to end the
    // session gracefully. Process exit releases the server child either way.
    let loop_task = tokio::spawn(async move { session.run().await });
    tokio::select! {
        joined = loop_task => joined.map_err(std::io::Error::other)??,
        _ = tokio::signal::ctrl_c() => {
            println!("\n\nGoodbye!");
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Session ended");
    println!("{}", "=".repeat(60));
    Ok(())
}
