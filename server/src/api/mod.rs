//! HTTP API: revenue and payment routes, OpenAPI docs, MCP tools

pub mod extractors;
mod mcp;
pub mod middleware;
pub mod openapi;
pub mod routes;
mod server;
pub mod types;

pub use server::ApiServer;
