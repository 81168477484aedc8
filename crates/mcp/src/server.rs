//! MCP Server Implementation
//!
//! Implements the Model Context Protocol server for HRDesk.

use hrdesk_core::HrServices;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt,
};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::handlers::{
    AddEmployeeInput, ApplyLeaveInput, CancelMeetingInput, CreateTicketInput, EmployeeIdInput,
    EmployeeLookupInput, HrToolHandlers, ListTicketsInput, ScheduleMeetingInput,
    UpdateTicketStatusInput,
};
use crate::tools::category_of;
use crate::McpResult;

/// Main MCP server for HRDesk
#[derive(Clone)]
pub struct HrDeskMcpServer {
    handlers: HrToolHandlers,
    name: String,
    instructions: Option<String>,
    tool_router: ToolRouter<Self>,
}

impl HrDeskMcpServer {
    /// Create a new MCP server over already-initialized stores
    pub fn new(services: HrServices) -> Self {
        Self {
            handlers: HrToolHandlers::new(services),
            name: "hrdesk-mcp".to_string(),
            instructions: None,
            tool_router: Self::tool_router(),
        }
    }

    /// Override the advertised server name and instructions
    pub fn with_identity(mut self, name: impl Into<String>, instructions: Option<String>) -> Self {
        self.name = name.into();
        self.instructions = instructions;
        self
    }

    pub fn handlers(&self) -> &HrToolHandlers {
        &self.handlers
    }

    /// Names of the registered tools, sorted
    pub fn tool_names(&self) -> Vec<String> {
        let mut names = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Run the server with stdio transport
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        use tokio::io::{stdin, stdout};

        info!(event_name = "mcp.server.starting", transport = "stdio", "starting MCP server");

        let service = self.serve((stdin(), stdout())).await?;

        // Wait for shutdown
        let quit_reason = service.waiting().await?;

        info!(event_name = "mcp.server.stopped", reason = ?quit_reason, "MCP server shutdown complete");
        Ok(())
    }

    /// Runs one tool call inside a correlated span and renders the outcome.
    ///
    /// Domain failures come back as error-flagged tool results so the
    /// assistant can read them; only rendering failures are protocol errors.
    fn dispatch<T, F>(&self, tool: &'static str, call: F) -> Result<CallToolResult, ErrorData>
    where
        T: Serialize,
        F: FnOnce(&HrToolHandlers) -> McpResult<T>,
    {
        let correlation_id = Uuid::new_v4().to_string();
        let span = info_span!(
            "tool_call",
            tool,
            category = category_of(tool).unwrap_or("unknown"),
            correlation_id = %correlation_id
        );
        let _entered = span.enter();
        debug!(event_name = "mcp.tool.called", "tool called");

        match call(&self.handlers) {
            Ok(output) => {
                let content = serde_json::to_string_pretty(&output)
                    .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
                Ok(CallToolResult::success(vec![Content::text(content)]))
            }
            Err(error) => {
                warn!(
                    event_name = "mcp.tool.failed",
                    error_code = error.error_code(),
                    error = %error,
                    "tool call failed"
                );
                let content = serde_json::to_string_pretty(&error.to_failure())
                    .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
                Ok(CallToolResult::error(vec![Content::text(content)]))
            }
        }
    }
}

// Implement ServerHandler trait for MCP protocol
#[tool_handler]
impl ServerHandler for HrDeskMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = self.name.clone();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: self.instructions.clone(),
        }
    }
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl HrDeskMcpServer {
    /// Add a new employee to the HRMS system
    #[tool(description = "Add a new employee to the HRMS system. Returns the new employee record.")]
    async fn add_employee(
        &self,
        Parameters(input): Parameters<AddEmployeeInput>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch("add_employee", |handlers| handlers.add_employee(input))
    }

    /// Get employee details by name
    #[tool(description = "Get employee details (ID, email, manager ID) by name")]
    async fn get_employee_details(
        &self,
        Parameters(input): Parameters<EmployeeLookupInput>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch("get_employee_details", |handlers| handlers.get_employee_details(input))
    }

    /// Create a ticket for buying required items for an employee
    #[tool(description = "Create a ticket for buying required items (laptop, ID card, ...) for an employee")]
    async fn create_ticket(
        &self,
        Parameters(input): Parameters<CreateTicketInput>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch("create_ticket", |handlers| handlers.create_ticket(input))
    }

    /// Update the status of a ticket
    #[tool(description = "Update the status of a ticket (OPEN, IN_PROGRESS, APPROVED, REJECTED, CLOSED)")]
    async fn update_ticket_status(
        &self,
        Parameters(input): Parameters<UpdateTicketStatusInput>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch("update_ticket_status", |handlers| handlers.update_ticket_status(input))
    }

    /// List tickets for an employee
    #[tool(description = "List tickets for an employee with an optional status filter")]
    async fn list_tickets(
        &self,
        Parameters(input): Parameters<ListTicketsInput>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch("list_tickets", |handlers| handlers.list_tickets(input))
    }

    /// Schedule a meeting for an employee
    #[tool(description = "Schedule a meeting for an employee")]
    async fn schedule_meeting(
        &self,
        Parameters(input): Parameters<ScheduleMeetingInput>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch("schedule_meeting", |handlers| handlers.schedule_meeting(input))
    }

    /// List an employee's meetings
    #[tool(description = "Get the list of meetings for an employee, earliest first")]
    async fn get_meetings(
        &self,
        Parameters(input): Parameters<EmployeeIdInput>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch("get_meetings", |handlers| handlers.get_meetings(input))
    }

    /// Cancel a scheduled meeting
    #[tool(description = "Cancel a scheduled meeting for an employee")]
    async fn cancel_meeting(
        &self,
        Parameters(input): Parameters<CancelMeetingInput>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch("cancel_meeting", |handlers| handlers.cancel_meeting(input))
    }

    /// Get an employee's leave balance
    #[tool(description = "Get the remaining leave balance of an employee")]
    async fn get_leave_balance(
        &self,
        Parameters(input): Parameters<EmployeeIdInput>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch("get_leave_balance", |handlers| handlers.get_leave_balance(input))
    }

    /// Apply leave for the given dates
    #[tool(description = "Apply leave for an employee on the given dates (YYYY-MM-DD)")]
    async fn apply_leave(
        &self,
        Parameters(input): Parameters<ApplyLeaveInput>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch("apply_leave", |handlers| handlers.apply_leave(input))
    }

    /// Get an employee's leave history
    #[tool(description = "Get the leave history for an employee")]
    async fn get_leave_history(
        &self,
        Parameters(input): Parameters<EmployeeIdInput>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch("get_leave_history", |handlers| handlers.get_leave_history(input))
    }
}
