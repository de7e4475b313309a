pub mod get_docs;

use tracing::info;

use crate::docs::{DocResolver, Topic};
use crate::protocol::{
    GetDocsParams, InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ToolCallParams, ToolResult,
};
use crate::schema;

/// Tool name as advertised to MCP clients.
pub const GET_DOCS_TOOL: &str = "GetReactDocsByTopic";

/// Instructions surfaced to the client during `initialize`, typically folded
/// into the model's system prompt.
const SERVER_INSTRUCTIONS: &str = "This server provides curated documentation for building a \
React web-application front end on AWS Amplify. Use the GetReactDocsByTopic tool to fetch the \
markdown reference for a topic instead of relying on model memory. Read essential-knowledge \
first when starting a new application, then fetch topics as needed.";

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, resolver: &DocResolver) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            // Client info is advisory; absent or unparseable params are fine.
            if let Some(init) = req
                .params
                .as_ref()
                .and_then(|v| serde_json::from_value::<InitializeParams>(v.clone()).ok())
            {
                let client = init.client_info.as_ref();
                info!(
                    "initialize: client {} {} (protocol {})",
                    client.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                    client.and_then(|c| c.version.as_deref()).unwrap_or(""),
                    init.protocol_version.as_deref().unwrap_or("unspecified")
                );
            }

            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "mcp-frontend-docs-server",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "instructions": SERVER_INSTRUCTIONS
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            let result = serde_json::json!({
                "tools": [
                    {
                        "name": GET_DOCS_TOOL,
                        "description": format!(
                            "Get React web application documentation by topic. \
                             Returns the markdown reference for one of: {}",
                            Topic::supported()
                        ),
                        "inputSchema": schema::get_docs_input_schema()
                    }
                ]
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = dispatch_tool_call(&params, resolver).await;
            let result_json = serde_json::to_value(&tool_result)
                .expect("ToolResult must serialize to JSON Value");
            Some(JsonRpcResponse::success(req.id.clone(), result_json))
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

async fn dispatch_tool_call(params: &ToolCallParams, resolver: &DocResolver) -> ToolResult {
    match params.name.as_str() {
        GET_DOCS_TOOL => {
            let args = match &params.arguments {
                Some(v) => v,
                None => {
                    return ToolResult::error(format!("Missing arguments for {GET_DOCS_TOOL}"));
                }
            };

            // Enforce the schema advertised in tools/list. Enumeration
            // membership is the one failure allowed through: a structurally
            // sound instance with an unknown topic reaches the resolver,
            // which names the rejected value and the valid set.
            let schema_check = schema::validate_instance(&schema::get_docs_input_schema(), args);
            let docs_params: GetDocsParams = match serde_json::from_value(args.clone()) {
                Ok(p) => p,
                Err(serde_err) => {
                    let detail = match schema_check {
                        Err(schema_err) => schema_err.to_string(),
                        Ok(()) => serde_err.to_string(),
                    };
                    return ToolResult::error(format!(
                        "Invalid arguments for {GET_DOCS_TOOL}: {detail}"
                    ));
                }
            };
            get_docs::handle(docs_params, resolver).await
        }

        _ => ToolResult::error(format!("Unknown tool: {}", params.name)),
    }
}
