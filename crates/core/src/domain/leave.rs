use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::ids::EmployeeId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplyRequest {
    pub emp_id: EmployeeId,
    pub leave_dates: BTreeSet<NaiveDate>,
}

impl LeaveApplyRequest {
    /// Collapses repeated dates; the request is charged once per distinct day.
    pub fn new(emp_id: EmployeeId, leave_dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self { emp_id, leave_dates: leave_dates.into_iter().collect() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub emp_id: EmployeeId,
    pub balance: u32,
    pub history: BTreeSet<NaiveDate>,
}

impl LeaveRecord {
    pub fn new(emp_id: EmployeeId, balance: u32) -> Self {
        Self { emp_id, balance, history: BTreeSet::new() }
    }
}

/// Outcome of a successful application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    pub emp_id: EmployeeId,
    pub applied: Vec<NaiveDate>,
    pub remaining_balance: u32,
}

pub fn parse_leave_date(value: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        DomainError::InvalidArgument(format!(
            "leave date `{trimmed}` is not a valid date (expected YYYY-MM-DD)"
        ))
    })
}
