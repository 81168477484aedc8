//! MCP Tools for HRDesk
//!
//! This module organizes the MCP tools into categories:
//! - Employee: Directory registration and lookup
//! - Ticket: Equipment request lifecycle
//! - Meeting: Scheduling and cancellation
//! - Leave: Balance, applications and history

/// Employee directory tools category
pub struct EmployeeTools;

/// Equipment ticket tools category
pub struct TicketTools;

/// Meeting tools category
pub struct MeetingTools;

/// Leave tools category
pub struct LeaveTools;

/// Tool category trait
pub trait ToolCategory {
    /// Category name
    fn category_name() -> &'static str
    where
        Self: Sized;
    /// List of tool names in this category
    fn tool_names() -> &'static [&'static str]
    where
        Self: Sized;
}

impl ToolCategory for EmployeeTools {
    fn category_name() -> &'static str {
        "employee"
    }
    fn tool_names() -> &'static [&'static str] {
        &["add_employee", "get_employee_details"]
    }
}

impl ToolCategory for TicketTools {
    fn category_name() -> &'static str {
        "ticket"
    }
    fn tool_names() -> &'static [&'static str] {
        &["create_ticket", "update_ticket_status", "list_tickets"]
    }
}

impl ToolCategory for MeetingTools {
    fn category_name() -> &'static str {
        "meeting"
    }
    fn tool_names() -> &'static [&'static str] {
        &["schedule_meeting", "get_meetings", "cancel_meeting"]
    }
}

impl ToolCategory for LeaveTools {
    fn category_name() -> &'static str {
        "leave"
    }
    fn tool_names() -> &'static [&'static str] {
        &["get_leave_balance", "apply_leave", "get_leave_history"]
    }
}

/// All tool names
pub const ALL_TOOL_NAMES: &[&str] = &[
    "add_employee",
    "get_employee_details",
    "create_ticket",
    "update_ticket_status",
    "list_tickets",
    "schedule_meeting",
    "get_meetings",
    "cancel_meeting",
    "get_leave_balance",
    "apply_leave",
    "get_leave_history",
];

/// Total number of tools
pub const TOTAL_TOOLS: usize = ALL_TOOL_NAMES.len();

/// Category a tool belongs to, if it is one of ours.
pub fn category_of(tool: &str) -> Option<&'static str> {
    [
        (EmployeeTools::category_name(), EmployeeTools::tool_names()),
        (TicketTools::category_name(), TicketTools::tool_names()),
        (MeetingTools::category_name(), MeetingTools::tool_names()),
        (LeaveTools::category_name(), LeaveTools::tool_names()),
    ]
    .into_iter()
    .find(|(_, names)| names.contains(&tool))
    .map(|(category, _)| category)
}
