use clap::Parser;
use tracing_subscriber::EnvFilter;

use mcp_frontend_docs_server::config::ServerConfig;
use mcp_frontend_docs_server::server::McpServer;

/// MCP server for React/Amplify frontend documentation.
#[derive(Parser)]
#[command(name = "mcp-frontend-docs-server", version)]
struct Cli {
    /// Serve JSON-RPC over TCP instead of stdio
    #[arg(long)]
    stream: bool,

    /// Port for the streaming transport
    #[arg(long, default_value_t = 8888)]
    port: u16,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout belongs to the transport.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let server = McpServer::new(ServerConfig::locate());

    let result = if cli.stream {
        server.run_stream(cli.port).await
    } else {
        server.run_stdio().await
    };

    if let Err(e) = result {
        tracing::error!("fatal error: {e}");
        std::process::exit(1);
    }
}
