use tracing::error;

use crate::docs::DocResolver;
use crate::protocol::{GetDocsParams, McpErrorCode, McpErrorResponse, ToolResult};

/// Handle a `GetReactDocsByTopic` tool call.
///
/// An unrecognized topic is a caller bug and comes back as a structured
/// `invalid_topic` tool error listing the valid set. A missing asset file is
/// a packaging gap and comes back as an empty success result, already logged
/// by the store.
pub async fn handle(params: GetDocsParams, resolver: &DocResolver) -> ToolResult {
    // The read is a single synchronous filesystem call; keep it off the
    // transport's reactor thread.
    let resolver = resolver.clone();
    let task = tokio::task::spawn_blocking(move || resolver.resolve(&params.topic));

    match task.await {
        Ok(Ok(content)) => ToolResult::text(content),
        Ok(Err(invalid)) => {
            McpErrorResponse::new(McpErrorCode::InvalidTopic, invalid.to_string()).into()
        }
        Err(join_err) => {
            error!("task join error: {join_err}");
            McpErrorResponse::new(McpErrorCode::InternalError, "Internal error").into()
        }
    }
}
