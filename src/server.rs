use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::handlers::{self, ServerContext};
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::search::{DuckDuckGoClient, SearchProvider};

/// Longest accepted input line, newline included (1 MiB).
pub const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Line-oriented JSON-RPC server for the search tools.
///
/// Requests are handled strictly one at a time: a line is read, fully
/// handled (including any outbound search), and answered before the next
/// line is read.
pub struct McpServer {
    ctx: ServerContext,
}

impl McpServer {
    /// Build a server backed by the DuckDuckGo client described in `config`.
    pub fn new(config: ServerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = DuckDuckGoClient::new(&config.search)?;
        Ok(Self::with_provider(config, Arc::new(client)))
    }

    pub fn with_provider(config: ServerConfig, search: Arc<dyn SearchProvider>) -> Self {
        Self {
            ctx: ServerContext::new(config, search),
        }
    }

    /// Serve stdin/stdout until end of input or until `shutdown` fires.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), Box<dyn std::error::Error>> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer, shutdown).await
    }

    /// Serve one request per line from `reader`, writing one response per
    /// line to `writer`.
    ///
    /// `shutdown` is checked between lines; a request already being handled
    /// runs to completion.
    pub async fn serve<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
        shutdown: CancellationToken,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    tracing::info!("shutdown requested, leaving read loop");
                    break;
                }
                read = read_line_bounded(&mut reader, &mut raw) => read?,
            };
            if n == 0 {
                tracing::info!("end of input");
                break;
            }

            if let Some(resp) = self.handle_line(&raw).await {
                write_response(&mut writer, &resp).await?;
            }
        }

        Ok(())
    }

    /// Handle one raw input line. Never fails: anything that cannot be
    /// handled becomes an error response.
    pub async fn handle_line(&self, raw: &[u8]) -> Option<JsonRpcResponse> {
        if raw.len() > MAX_MESSAGE_BYTES {
            tracing::warn!(limit = MAX_MESSAGE_BYTES, "message too large");
            return Some(JsonRpcResponse::error(
                None,
                JsonRpcError::internal_error(format!("Message exceeds {MAX_MESSAGE_BYTES} bytes")),
            ));
        }

        let trimmed = match std::str::from_utf8(raw) {
            Ok(s) => s.trim(),
            Err(e) => {
                tracing::warn!(error = %e, "input is not valid UTF-8");
                return Some(JsonRpcResponse::error(None, JsonRpcError::internal_error(e)));
            }
        };

        if trimmed.is_empty() {
            return None;
        }

        let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "parse error");
                return Some(JsonRpcResponse::error(
                    JsonRpcRequest::salvage_id(trimmed),
                    JsonRpcError::internal_error(format!("Parse error: {e}")),
                ));
            }
        };

        if req.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request()));
        }

        handlers::dispatch(&req, &self.ctx).await
    }
}

/// Read one line into `buf`, holding at most `MAX_MESSAGE_BYTES + 1` bytes.
///
/// The rest of an oversized line is consumed and discarded so the next read
/// starts on a fresh line. Returns the number of bytes kept; 0 at end of input.
async fn read_line_bounded<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let n = (&mut *reader)
        .take(MAX_MESSAGE_BYTES as u64 + 1)
        .read_until(b'\n', buf)
        .await?;

    if buf.len() > MAX_MESSAGE_BYTES && !buf.ends_with(b"\n") {
        loop {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                break;
            }
            match available.iter().position(|b| *b == b'\n') {
                Some(i) => {
                    reader.consume(i + 1);
                    break;
                }
                None => {
                    let len = available.len();
                    reader.consume(len);
                }
            }
        }
    }

    Ok(n)
}

async fn write_response<W>(writer: &mut W, resp: &JsonRpcResponse) -> Result<(), Box<dyn std::error::Error>>
where
    W: AsyncWrite + Unpin,
{
    let out = serde_json::to_string(resp)?;
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
