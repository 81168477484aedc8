use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use serde::{Deserialize, Serialize};

const EMPLOYEE_PREFIX: &str = "E";
const TICKET_PREFIX: &str = "T";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(pub String);

impl EmployeeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric part of an allocator-issued identifier, `None` for foreign values.
    pub fn sequence(&self) -> Option<u64> {
        parse_sequence(&self.0, EMPLOYEE_PREFIX)
    }
}

impl TicketId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn sequence(&self) -> Option<u64> {
        parse_sequence(&self.0, TICKET_PREFIX)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Padding stops being wide enough at E1000, so order by sequence first.
impl Ord for EmployeeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sequence().cmp(&other.sequence()).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for EmployeeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TicketId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sequence().cmp(&other.sequence()).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for TicketId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn parse_sequence(value: &str, prefix: &str) -> Option<u64> {
    let digits = value.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Issues employee and ticket identifiers for the lifetime of the process.
///
/// Each entity kind has its own counter. Values are never reused.
#[derive(Debug, Default)]
pub struct IdAllocator {
    employees: AtomicU64,
    tickets: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_employee_id(&self) -> EmployeeId {
        let sequence = self.employees.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        EmployeeId(format!("{EMPLOYEE_PREFIX}{sequence:03}"))
    }

    pub fn next_ticket_id(&self) -> TicketId {
        let sequence = self.tickets.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        TicketId(format!("{TICKET_PREFIX}{sequence:04}"))
    }

    pub fn issued_employee_ids(&self) -> u64 {
        self.employees.load(AtomicOrdering::SeqCst)
    }

    pub fn issued_ticket_ids(&self) -> u64 {
        self.tickets.load(AtomicOrdering::SeqCst)
    }
}
