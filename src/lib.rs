//! MCP server for React/Amplify frontend documentation.
//!
//! Exposes a single `GetReactDocsByTopic` tool over JSON-RPC 2.0, served on
//! stdio by default or over TCP with `--stream`. Each topic in a closed
//! enumeration maps to one packaged markdown file; the tool returns that
//! file's contents verbatim.

pub mod config;
pub mod docs;
pub mod handlers;
pub mod protocol;
pub mod server;

pub mod schema;
