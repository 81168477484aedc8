use std::fmt;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::ticket::TicketStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Employee,
    LeaveRecord,
    Ticket,
    Meeting,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Employee => "employee",
            Self::LeaveRecord => "leave record",
            Self::Ticket => "ticket",
            Self::Meeting => "meeting",
        })
    }
}

/// Coarse classification callers can match on without inspecting payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    InsufficientBalance,
    MeetingConflict,
    AmbiguousCancellation,
    InvalidTransition,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{kind} `{id}` not found")]
    NotFound { kind: RecordKind, id: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("manager `{0}` does not reference an existing employee")]
    UnknownManager(String),
    #[error("insufficient leave balance for `{emp_id}`: requested {requested}, available {available}")]
    InsufficientBalance { emp_id: String, requested: u32, available: u32 },
    #[error("meeting `{topic}` at {meeting_dt} is already scheduled for `{emp_id}`")]
    MeetingConflict { emp_id: String, meeting_dt: NaiveDateTime, topic: String },
    #[error(
        "{} meetings for `{emp_id}` at {meeting_dt} match; specify a topic ({})",
        .topics.len(),
        .topics.join(", ")
    )]
    AmbiguousCancellation { emp_id: String, meeting_dt: NaiveDateTime, topics: Vec<String> },
    #[error("invalid ticket transition from {from} to {to}")]
    InvalidTicketTransition { from: TicketStatus, to: TicketStatus },
}

impl DomainError {
    pub fn not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::UnknownManager(_) => ErrorKind::NotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::MeetingConflict { .. } => ErrorKind::MeetingConflict,
            Self::AmbiguousCancellation { .. } => ErrorKind::AmbiguousCancellation,
            Self::InvalidTicketTransition { .. } => ErrorKind::InvalidTransition,
        }
    }
}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidArgument(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
