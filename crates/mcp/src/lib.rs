//! HRDesk MCP (Model Context Protocol) Server
//!
//! Exposes the HR record core to AI assistants as MCP tools: employee
//! directory lookups, equipment tickets, meeting scheduling and leave.
//!
//! ## Architecture
//!
//! - `HrDeskMcpServer`: MCP protocol surface, one tool per operation
//! - `HrToolHandlers`: argument validation and forwarding to the managers
//! - `tools`: tool catalogue grouped by category
//!
//! ## Example Usage
//!
//! ```no_run
//! use hrdesk_core::{HrServices, LeavePolicy};
//! use hrdesk_mcp::HrDeskMcpServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let services = HrServices::new(LeavePolicy::with_default_allotment(20));
//!     services.seed()?;
//!     HrDeskMcpServer::new(services).run_stdio().await
//! }
//! ```

mod handlers;
mod server;
mod tools;

pub use handlers::*;
pub use server::HrDeskMcpServer;
pub use tools::*;

use hrdesk_core::{DomainError, ErrorKind};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by tool calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum McpError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl McpError {
    /// Convert to JSON-RPC error code
    pub fn error_code(&self) -> i32 {
        match self {
            McpError::Domain(error) => match error.kind() {
                ErrorKind::NotFound | ErrorKind::InvalidArgument => -32602,
                ErrorKind::InsufficientBalance
                | ErrorKind::MeetingConflict
                | ErrorKind::AmbiguousCancellation
                | ErrorKind::InvalidTransition => -32600,
            },
            McpError::Validation(_) => -32602,
            McpError::Internal(_) => -32603,
        }
    }

    /// Stable label the assistant can branch on.
    pub fn label(&self) -> &'static str {
        match self {
            McpError::Domain(error) => match error.kind() {
                ErrorKind::NotFound => "not_found",
                ErrorKind::InvalidArgument => "invalid_argument",
                ErrorKind::InsufficientBalance => "insufficient_balance",
                ErrorKind::MeetingConflict => "meeting_conflict",
                ErrorKind::AmbiguousCancellation => "ambiguous_cancellation",
                ErrorKind::InvalidTransition => "invalid_transition",
            },
            McpError::Validation(_) => "invalid_argument",
            McpError::Internal(_) => "internal",
        }
    }

    pub fn to_failure(&self) -> ToolFailure {
        ToolFailure { error: self.label(), code: self.error_code(), message: self.to_string() }
    }
}

/// Body of a tool result flagged as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
    pub error: &'static str,
    pub code: i32,
    pub message: String,
}

/// Result type for MCP operations
pub type McpResult<T> = Result<T, McpError>;
