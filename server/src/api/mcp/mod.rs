//! MCP tool server over streamable HTTP
//!
//! Exposes the revenue queries as MCP tools. Each session gets its own
//! `McpServer`, all sharing one `RevenueService`.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::core::shutdown::ShutdownService;
use crate::domain::RevenueService;

mod tools;
mod types;

use self::tools::McpServer;

pub type McpService = StreamableHttpService<McpServer>;

/// Build the MCP service mounted at `/mcp`
pub fn service(revenue: RevenueService, ct: CancellationToken) -> McpService {
    McpService::new(
        move || Ok(McpServer::new(revenue.clone())),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            cancellation_token: ct,
            ..Default::default()
        },
    )
}

/// Token cancelled when the shutdown signal fires, ending open MCP sessions
pub fn cancellation_token_from_shutdown(shutdown: &ShutdownService) -> CancellationToken {
    let token = CancellationToken::new();
    let mut rx = shutdown.subscribe();
    let t = token.clone();
    tokio::spawn(async move {
        let _ = rx.wait_for(|&v| v).await;
        t.cancel();
    });
    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PaymentsDatabase;

    #[tokio::test]
    async fn test_token_cancelled_on_shutdown() {
        let database = Arc::new(PaymentsDatabase::in_memory().await);
        let shutdown = ShutdownService::new(database);
        let token = cancellation_token_from_shutdown(&shutdown);
        assert!(!token.is_cancelled());

        shutdown.trigger();
        tokio::time::timeout(std::time::Duration::from_secs(5), token.cancelled())
            .await
            .unwrap();
    }
}
