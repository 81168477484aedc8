use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::ids::{EmployeeId, TicketId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    InProgress,
    Approved,
    Rejected,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 5] =
        [Self::Open, Self::InProgress, Self::Approved, Self::Rejected, Self::Closed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Closed => "CLOSED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }

    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::InProgress)
                | (Self::Open, Self::Approved)
                | (Self::Open, Self::Rejected)
                | (Self::Open, Self::Closed)
                | (Self::InProgress, Self::Approved)
                | (Self::InProgress, Self::Rejected)
                | (Self::InProgress, Self::Closed)
                | (Self::Approved, Self::Closed)
                | (Self::Rejected, Self::Closed)
        )
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidArgument(format!(
                "unknown ticket status `{}` (expected OPEN|IN_PROGRESS|APPROVED|REJECTED|CLOSED)",
                value.trim()
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCreate {
    pub emp_id: EmployeeId,
    pub item: String,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: TicketId,
    pub emp_id: EmployeeId,
    pub item: String,
    pub reason: String,
    pub status: TicketStatus,
}

impl Ticket {
    pub fn transition_to(&mut self, next: TicketStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(next) {
            self.status = next;
            return Ok(());
        }

        Err(DomainError::InvalidTicketTransition { from: self.status, to: next })
    }
}
