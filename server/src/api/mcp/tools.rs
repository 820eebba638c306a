use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo, ToolsCapability,
};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};

use crate::core::constants::{DEFAULT_LAST_N_DAYS, DEFAULT_STATUS, MCP_SERVER_NAME};
use crate::domain::{RevenueError, RevenueService};

use super::types::*;

type McpError = rmcp::model::ErrorData;

#[derive(Clone)]
pub struct McpServer {
    revenue: RevenueService,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(revenue: RevenueService) -> Self {
        Self {
            revenue,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: MCP_SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

const INSTRUCTIONS: &str = r#"Payment revenue analytics over the payments table.

All amounts are USD with two decimals. Every tool filters on payment status,
which defaults to "completed"; pass another status (pending, failed, refunded)
to inspect those payments instead.

Dates are ISO 8601: 2024-03-05, 2024-03-05T10:00:00 or 2024-03-05T10:00:00Z.
Times without an offset are UTC. Other formats are rejected.

TOOLS:
- total_revenue: all-time total
- this_month / year_to_date: current calendar month or year so far
- last_n_days: trailing window ending now
- custom_range: explicit inclusive start and end dates
- by_category: breakdown by product category (uncategorized for none)
- by_month: per-month totals of one year; months without payments are omitted"#;

#[tool_router]
impl McpServer {
    #[tool(description = "Total revenue across all time for a payment status.")]
    async fn total_revenue(
        &self,
        Parameters(input): Parameters<StatusInput>,
    ) -> Result<CallToolResult, McpError> {
        let report = self
            .revenue
            .total(status_or_default(&input.status))
            .await
            .map_err(revenue_err)?;
        ok_json(&report)
    }

    #[tool(description = "Revenue for the current calendar month (UTC), up to now.")]
    async fn this_month(
        &self,
        Parameters(input): Parameters<StatusInput>,
    ) -> Result<CallToolResult, McpError> {
        let report = self
            .revenue
            .this_month(status_or_default(&input.status))
            .await
            .map_err(revenue_err)?;
        ok_json(&report)
    }

    #[tool(description = "Revenue from January 1 of the current year (UTC) until now.")]
    async fn year_to_date(
        &self,
        Parameters(input): Parameters<StatusInput>,
    ) -> Result<CallToolResult, McpError> {
        let report = self
            .revenue
            .year_to_date(status_or_default(&input.status))
            .await
            .map_err(revenue_err)?;
        ok_json(&report)
    }

    #[tool(description = "Revenue between two ISO 8601 dates, both inclusive.")]
    async fn custom_range(
        &self,
        Parameters(input): Parameters<CustomRangeInput>,
    ) -> Result<CallToolResult, McpError> {
        let report = self
            .revenue
            .custom_range(
                &input.start_date,
                &input.end_date,
                status_or_default(&input.status),
            )
            .await
            .map_err(revenue_err)?;
        ok_json(&report)
    }

    #[tool(description = "Revenue over the last N days ending now (default 30).")]
    async fn last_n_days(
        &self,
        Parameters(input): Parameters<LastNDaysInput>,
    ) -> Result<CallToolResult, McpError> {
        let report = self
            .revenue
            .last_n_days(
                input.days.unwrap_or(DEFAULT_LAST_N_DAYS),
                status_or_default(&input.status),
            )
            .await
            .map_err(revenue_err)?;
        ok_json(&report)
    }

    #[tool(
        description = "Revenue and transaction count per product category, optionally within a date range."
    )]
    async fn by_category(
        &self,
        Parameters(input): Parameters<ByCategoryInput>,
    ) -> Result<CallToolResult, McpError> {
        let breakdown = self
            .revenue
            .by_category(
                input.start_date.as_deref(),
                input.end_date.as_deref(),
                status_or_default(&input.status),
            )
            .await
            .map_err(revenue_err)?;
        ok_json(&breakdown)
    }

    #[tool(description = "Revenue and transaction count per month of one calendar year.")]
    async fn by_month(
        &self,
        Parameters(input): Parameters<ByMonthInput>,
    ) -> Result<CallToolResult, McpError> {
        let breakdown = self
            .revenue
            .by_month(input.year, status_or_default(&input.status))
            .await
            .map_err(revenue_err)?;
        ok_json(&breakdown)
    }
}

fn status_or_default(status: &Option<String>) -> &str {
    status.as_deref().unwrap_or(DEFAULT_STATUS)
}

fn ok_json(value: &impl serde::Serialize) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string(value).map_err(mcp_err)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Bad input is the caller's to fix; storage failures are not
fn revenue_err(e: RevenueError) -> McpError {
    if e.is_client_error() {
        McpError::invalid_params(e.to_string(), None)
    } else {
        tracing::error!(error = %e, "MCP tool data error");
        McpError::internal_error("Database operation failed", None)
    }
}

fn mcp_err(e: impl std::fmt::Display) -> McpError {
    tracing::debug!(error = %e, "MCP tool error");
    McpError::internal_error(e.to_string(), None)
}
