use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::docs::{DocResolver, DocStore};
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Error surfaced by the serve loops.
pub type ServeError = Box<dyn std::error::Error + Send + Sync>;

/// MCP server speaking newline-delimited JSON-RPC 2.0 over stdio or TCP.
///
/// The resolver is the only state shared between sessions; it is immutable
/// after startup, so concurrent TCP sessions need no coordination.
pub struct McpServer {
    resolver: DocResolver,
}

impl McpServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            resolver: DocResolver::new(DocStore::new(config.docs_root)),
        }
    }

    /// Serve a single session on stdio until EOF.
    pub async fn run_stdio(&self) -> Result<(), ServeError> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        serve_session(self.resolver.clone(), BufReader::new(stdin), stdout).await
    }

    /// Streaming transport: accept TCP connections and run an independent
    /// session on each.
    pub async fn run_stream(&self, port: u16) -> Result<(), ServeError> {
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        self.serve_listener(listener).await
    }

    /// Accept loop over an already-bound listener, one session per
    /// connection.
    pub async fn serve_listener(&self, listener: TcpListener) -> Result<(), ServeError> {
        info!("listening on {}", listener.local_addr()?);

        loop {
            let (socket, peer) = listener.accept().await?;
            info!("client connected: {peer}");
            let resolver = self.resolver.clone();
            tokio::spawn(async move {
                let (read_half, write_half) = socket.into_split();
                if let Err(e) =
                    serve_session(resolver, BufReader::new(read_half), write_half).await
                {
                    warn!("session for {peer} ended with error: {e}");
                }
                info!("client disconnected: {peer}");
            });
        }
    }
}

/// Run one JSON-RPC session over any line-oriented byte stream: read
/// newline-delimited requests until EOF, write one response line per request
/// (none for notifications). Every session starts uninitialized; only
/// `initialize` is served before the handshake completes.
pub async fn serve_session<R, W>(
    resolver: DocResolver,
    mut reader: R,
    mut writer: W,
) -> Result<(), ServeError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut initialized = false;
    let mut raw = Vec::new();

    loop {
        raw.clear();
        let n = reader.read_until(b'\n', &mut raw).await?;
        if n == 0 {
            break;
        }

        if n > MAX_MESSAGE_BYTES {
            warn!("message too large: {n} bytes (limit {MAX_MESSAGE_BYTES})");
            write_response(
                &mut writer,
                &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
            )
            .await?;
            continue;
        }

        let trimmed = match std::str::from_utf8(&raw) {
            Ok(s) => s.trim(),
            Err(_) => {
                write_response(
                    &mut writer,
                    &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
                )
                .await?;
                continue;
            }
        };

        if trimmed.is_empty() {
            continue;
        }

        let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                warn!("parse error: {e}");
                write_response(
                    &mut writer,
                    &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
                )
                .await?;
                continue;
            }
        };

        // Validate jsonrpc version
        if req.jsonrpc != "2.0" {
            write_response(
                &mut writer,
                &JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request()),
            )
            .await?;
            continue;
        }

        // Initialization gate: only `initialize` is allowed before handshake completes
        if !initialized && req.method != "initialize" {
            if req.id.is_none() {
                continue;
            }
            write_response(
                &mut writer,
                &JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::invalid_request_with("Server not initialized"),
                ),
            )
            .await?;
            continue;
        }

        if let Some(resp) = handlers::dispatch(&req, &resolver).await {
            write_response(&mut writer, &resp).await?;
        }

        if req.method == "initialize" {
            initialized = true;
        }
    }

    Ok(())
}

async fn write_response<W>(writer: &mut W, resp: &JsonRpcResponse) -> Result<(), ServeError>
where
    W: AsyncWrite + Unpin,
{
    let out = serde_json::to_string(resp)?;
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
