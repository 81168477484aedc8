//! Tool argument handling.
//!
//! Each handler validates the raw tool arguments, builds the typed core
//! request and forwards it to exactly one manager.

use chrono::NaiveDateTime;
use hrdesk_core::{
    parse_leave_date, parse_meeting_dt, DomainError, Employee, EmployeeCreate, EmployeeId,
    HrServices, LeaveApplyRequest, Meeting, MeetingCancelRequest, MeetingCreate, RecordKind,
    Ticket, TicketCreate, TicketId, TicketStatus,
};
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::{McpError, McpResult};

const MEETING_DT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ============================================================================
// Employee Tools
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddEmployeeInput {
    #[schemars(description = "Employee name")]
    pub emp_name: String,

    #[schemars(description = "Manager's employee ID (optional, empty for none)")]
    #[serde(default)]
    pub manager_id: Option<String>,

    #[schemars(description = "Employee email address")]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmployeeLookupInput {
    #[schemars(description = "Name or part of the name of the employee")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EmployeeDetails {
    pub emp_id: String,
    pub name: String,
    pub email: String,
    pub manager_id: Option<String>,
}

impl From<Employee> for EmployeeDetails {
    fn from(employee: Employee) -> Self {
        Self {
            emp_id: employee.emp_id.0,
            name: employee.name,
            email: employee.email,
            manager_id: employee.manager_id.map(|id| id.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AddEmployeeResult {
    pub employee: EmployeeDetails,
    pub message: String,
}

// ============================================================================
// Ticket Tools
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateTicketInput {
    #[schemars(description = "Employee ID")]
    pub emp_id: String,

    #[schemars(description = "Item requested (Laptop, ID Card, etc.)")]
    pub item: String,

    #[schemars(description = "Reason for the request")]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTicketStatusInput {
    #[schemars(description = "Ticket ID")]
    pub ticket_id: String,

    #[schemars(description = "New status: OPEN, IN_PROGRESS, APPROVED, REJECTED or CLOSED")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListTicketsInput {
    #[schemars(description = "Employee ID")]
    pub employee_id: String,

    #[schemars(description = "Ticket status filter (optional)")]
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TicketSummary {
    pub ticket_id: String,
    pub emp_id: String,
    pub item: String,
    pub reason: String,
    pub status: String,
}

impl From<Ticket> for TicketSummary {
    fn from(ticket: Ticket) -> Self {
        Self {
            ticket_id: ticket.ticket_id.0,
            emp_id: ticket.emp_id.0,
            item: ticket.item,
            reason: ticket.reason,
            status: ticket.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TicketResult {
    pub ticket: TicketSummary,
    pub message: String,
}

// ============================================================================
// Meeting Tools
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleMeetingInput {
    #[schemars(description = "Employee ID")]
    pub emp_id: String,

    #[schemars(description = "Date and time of the meeting, e.g. 2025-01-15T10:00:00")]
    pub meeting_dt: String,

    #[schemars(description = "Topic of the meeting")]
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmployeeIdInput {
    #[schemars(description = "Employee ID")]
    pub employee_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CancelMeetingInput {
    #[schemars(description = "Employee ID")]
    pub employee_id: String,

    #[schemars(description = "Date and time of the meeting, e.g. 2025-01-15T10:00:00")]
    pub meeting_dt: String,

    #[schemars(description = "Topic of the meeting (optional when only one meeting is at that time)")]
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MeetingSummary {
    pub emp_id: String,
    pub meeting_dt: String,
    pub topic: String,
    pub status: String,
}

impl From<Meeting> for MeetingSummary {
    fn from(meeting: Meeting) -> Self {
        Self {
            emp_id: meeting.emp_id.0,
            meeting_dt: format_meeting_dt(meeting.meeting_dt),
            topic: meeting.topic,
            status: meeting.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MeetingResult {
    pub meeting: MeetingSummary,
    pub message: String,
}

// ============================================================================
// Leave Tools
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApplyLeaveInput {
    #[schemars(description = "Employee ID")]
    pub employee_id: String,

    #[schemars(description = "Leave dates as YYYY-MM-DD")]
    pub leave_dates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LeaveBalance {
    pub emp_id: String,
    pub balance: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LeaveApplied {
    pub emp_id: String,
    pub applied_dates: Vec<String>,
    pub remaining_balance: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LeaveHistory {
    pub emp_id: String,
    pub dates: Vec<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Validates tool arguments and forwards them to the HR managers.
#[derive(Clone, Debug)]
pub struct HrToolHandlers {
    services: HrServices,
}

impl HrToolHandlers {
    pub fn new(services: HrServices) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &HrServices {
        &self.services
    }

    pub fn add_employee(&self, input: AddEmployeeInput) -> McpResult<AddEmployeeResult> {
        let employee = self.services.directory.add(EmployeeCreate {
            name: input.emp_name,
            email: input.email,
            manager_id: input.manager_id.map(EmployeeId),
        })?;

        let message = format!("Employee {} added successfully as {}", employee.name, employee.emp_id);
        Ok(AddEmployeeResult { employee: employee.into(), message })
    }

    /// Resolves the first employee whose name contains the query.
    pub fn get_employee_details(&self, input: EmployeeLookupInput) -> McpResult<EmployeeDetails> {
        let query = required("name", &input.name)?;
        let emp_id = self
            .services
            .directory
            .search_by_name(&query)
            .into_iter()
            .next()
            .ok_or_else(|| {
                McpError::Domain(DomainError::not_found(
                    RecordKind::Employee,
                    format!("matching '{query}'"),
                ))
            })?;

        Ok(self.services.directory.get_by_id(&emp_id)?.into())
    }

    pub fn create_ticket(&self, input: CreateTicketInput) -> McpResult<TicketResult> {
        let emp_id = self.known_employee(&input.emp_id)?;
        let ticket = self.services.tickets.create(TicketCreate {
            emp_id,
            item: input.item,
            reason: input.reason,
        })?;

        let message = format!("Ticket {} created for {}", ticket.ticket_id, ticket.item);
        Ok(TicketResult { ticket: ticket.into(), message })
    }

    pub fn update_ticket_status(&self, input: UpdateTicketStatusInput) -> McpResult<TicketResult> {
        let ticket_id = TicketId(required("ticket_id", &input.ticket_id)?);
        let ticket = self.services.tickets.update_status_str(&ticket_id, &input.status)?;

        let message = format!("Ticket {} status updated to {}", ticket.ticket_id, ticket.status);
        Ok(TicketResult { ticket: ticket.into(), message })
    }

    /// A blank or missing status means "no filter".
    pub fn list_tickets(&self, input: ListTicketsInput) -> McpResult<Vec<TicketSummary>> {
        let emp_id = self.known_employee(&input.employee_id)?;
        let status = input
            .status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .map(str::parse::<TicketStatus>)
            .transpose()?;

        Ok(self.services.tickets.list(&emp_id, status).into_iter().map(Into::into).collect())
    }

    pub fn schedule_meeting(&self, input: ScheduleMeetingInput) -> McpResult<MeetingResult> {
        let emp_id = self.known_employee(&input.emp_id)?;
        let meeting_dt = parse_meeting_dt(&input.meeting_dt)?;
        let meeting =
            self.services.meetings.schedule(MeetingCreate { emp_id, meeting_dt, topic: input.topic })?;

        let message = format!(
            "Meeting '{}' scheduled for {} at {}",
            meeting.topic,
            meeting.emp_id,
            format_meeting_dt(meeting.meeting_dt)
        );
        Ok(MeetingResult { meeting: meeting.into(), message })
    }

    pub fn get_meetings(&self, input: EmployeeIdInput) -> McpResult<Vec<MeetingSummary>> {
        let emp_id = self.known_employee(&input.employee_id)?;
        Ok(self.services.meetings.list(&emp_id).into_iter().map(Into::into).collect())
    }

    pub fn cancel_meeting(&self, input: CancelMeetingInput) -> McpResult<MeetingResult> {
        let emp_id = self.known_employee(&input.employee_id)?;
        let meeting_dt = parse_meeting_dt(&input.meeting_dt)?;
        let meeting = self.services.meetings.cancel(MeetingCancelRequest {
            emp_id,
            meeting_dt,
            topic: input.topic,
        })?;

        let message = format!(
            "Meeting '{}' at {} cancelled",
            meeting.topic,
            format_meeting_dt(meeting.meeting_dt)
        );
        Ok(MeetingResult { meeting: meeting.into(), message })
    }

    pub fn get_leave_balance(&self, input: EmployeeIdInput) -> McpResult<LeaveBalance> {
        let emp_id = self.known_employee(&input.employee_id)?;
        let balance = self.services.leave.get_balance(&emp_id)?;
        Ok(LeaveBalance { emp_id: emp_id.0, balance })
    }

    pub fn apply_leave(&self, input: ApplyLeaveInput) -> McpResult<LeaveApplied> {
        let emp_id = self.known_employee(&input.employee_id)?;
        let dates = input
            .leave_dates
            .iter()
            .map(|raw| parse_leave_date(raw))
            .collect::<Result<Vec<_>, _>>()?;
        let outcome = self.services.leave.apply_leave(LeaveApplyRequest::new(emp_id, dates))?;

        let applied_dates = outcome.applied.iter().map(ToString::to_string).collect::<Vec<_>>();
        let message = format!(
            "Leave applied for {} day(s); {} day(s) remaining",
            applied_dates.len(),
            outcome.remaining_balance
        );
        Ok(LeaveApplied {
            emp_id: outcome.emp_id.0,
            applied_dates,
            remaining_balance: outcome.remaining_balance,
            message,
        })
    }

    pub fn get_leave_history(&self, input: EmployeeIdInput) -> McpResult<LeaveHistory> {
        let emp_id = self.known_employee(&input.employee_id)?;
        let dates = self
            .services
            .leave
            .get_history(&emp_id)
            .into_iter()
            .map(|date| date.to_string())
            .collect();
        Ok(LeaveHistory { emp_id: emp_id.0, dates })
    }

    fn known_employee(&self, raw: &str) -> McpResult<EmployeeId> {
        let emp_id = EmployeeId(required("employee id", raw)?);
        if !self.services.directory.contains(&emp_id) {
            return Err(DomainError::not_found(RecordKind::Employee, emp_id.0).into());
        }
        Ok(emp_id)
    }
}

fn required(field: &str, value: &str) -> McpResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(McpError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn format_meeting_dt(meeting_dt: NaiveDateTime) -> String {
    meeting_dt.format(MEETING_DT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use hrdesk_core::{HrServices, LeavePolicy};

    use super::*;

    fn handlers() -> HrToolHandlers {
        HrToolHandlers::new(HrServices::new(LeavePolicy::with_default_allotment(20)))
    }

    fn hire(handlers: &HrToolHandlers, name: &str) -> String {
        handlers
            .add_employee(AddEmployeeInput {
                emp_name: name.to_string(),
                manager_id: None,
                email: format!("{}@atliq.com", name.to_lowercase()),
            })
            .expect("add employee")
            .employee
            .emp_id
    }

    #[test]
    fn blank_status_filter_lists_everything() {
        let handlers = handlers();
        let emp_id = hire(&handlers, "Ivy");
        handlers
            .create_ticket(CreateTicketInput {
                emp_id: emp_id.clone(),
                item: "Laptop".to_string(),
                reason: "New hire".to_string(),
            })
            .expect("ticket");

        let all = handlers
            .list_tickets(ListTicketsInput { employee_id: emp_id.clone(), status: Some(" ".to_string()) })
            .expect("list");
        assert_eq!(all.len(), 1);

        let closed = handlers
            .list_tickets(ListTicketsInput { employee_id: emp_id, status: Some("closed".to_string()) })
            .expect("list closed");
        assert!(closed.is_empty());
    }

    #[test]
    fn unknown_employee_is_rejected_before_reaching_managers() {
        let handlers = handlers();
        let error = handlers
            .create_ticket(CreateTicketInput {
                emp_id: "E404".to_string(),
                item: "Laptop".to_string(),
                reason: "New hire".to_string(),
            })
            .expect_err("unknown employee");
        assert_eq!(error.label(), "not_found");
        assert!(handlers.services().tickets.is_empty());
    }

    #[test]
    fn malformed_leave_date_is_invalid_argument() {
        let handlers = handlers();
        let emp_id = hire(&handlers, "Ivy");
        let error = handlers
            .apply_leave(ApplyLeaveInput { employee_id: emp_id, leave_dates: vec!["tomorrow".to_string()] })
            .expect_err("bad date");
        assert_eq!(error.label(), "invalid_argument");
    }

    #[test]
    fn meeting_summary_uses_iso_timestamps() {
        let handlers = handlers();
        let emp_id = hire(&handlers, "Ivy");
        let scheduled = handlers
            .schedule_meeting(ScheduleMeetingInput {
                emp_id,
                meeting_dt: "2025-01-15 10:00".to_string(),
                topic: "Intro".to_string(),
            })
            .expect("schedule");
        assert_eq!(scheduled.meeting.meeting_dt, "2025-01-15T10:00:00");
        assert_eq!(scheduled.meeting.status, "SCHEDULED");
    }
}
