use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::leave::{LeaveApplication, LeaveApplyRequest, LeaveRecord};
use crate::errors::{DomainError, RecordKind};
use crate::ids::EmployeeId;
use crate::store::Store;

/// Balance granted to employees that have no ledger entry yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LeavePolicy {
    pub default_allotment: Option<u32>,
}

impl LeavePolicy {
    pub fn with_default_allotment(days: u32) -> Self {
        Self { default_allotment: Some(days) }
    }

    pub fn strict() -> Self {
        Self { default_allotment: None }
    }
}

/// Per-employee leave balance and the set of days already taken.
///
/// The ledger does not consult the directory: any identifier is accepted,
/// and unknown ones fall back to the policy's default allotment.
#[derive(Debug)]
pub struct LeaveLedger {
    policy: LeavePolicy,
    records: Store<HashMap<EmployeeId, LeaveRecord>>,
}

impl LeaveLedger {
    pub fn new(policy: LeavePolicy) -> Self {
        Self { policy, records: Store::default() }
    }

    /// Sets the balance for `emp_id`, keeping any history already recorded.
    pub fn set_balance(&self, emp_id: &EmployeeId, balance: u32) {
        let mut records = self.records.write();
        records
            .entry(emp_id.clone())
            .and_modify(|record| record.balance = balance)
            .or_insert_with(|| LeaveRecord::new(emp_id.clone(), balance));
    }

    pub fn get_balance(&self, emp_id: &EmployeeId) -> Result<u32, DomainError> {
        let records = self.records.read();
        match records.get(emp_id) {
            Some(record) => Ok(record.balance),
            None => self.default_balance(emp_id),
        }
    }

    /// Deducts one day per distinct date and records the dates, or changes nothing.
    ///
    /// Dates already in the employee's history reject the whole request.
    pub fn apply_leave(&self, request: LeaveApplyRequest) -> Result<LeaveApplication, DomainError> {
        let LeaveApplyRequest { emp_id, leave_dates } = request;
        if leave_dates.is_empty() {
            return Err(DomainError::InvalidArgument("leave_dates must not be empty".to_string()));
        }

        let mut records = self.records.write();
        let (balance, already_taken) = match records.get(&emp_id) {
            Some(record) => (
                record.balance,
                leave_dates.intersection(&record.history).copied().collect::<Vec<_>>(),
            ),
            None => (self.default_balance(&emp_id)?, Vec::new()),
        };

        if !already_taken.is_empty() {
            let listed = already_taken.iter().map(ToString::to_string).collect::<Vec<_>>();
            warn!(
                event_name = "hr.leave.rejected",
                emp_id = %emp_id,
                reason = "already_recorded",
                "leave application rejected"
            );
            return Err(DomainError::InvalidArgument(format!(
                "leave already recorded for `{emp_id}` on {}",
                listed.join(", ")
            )));
        }

        let requested = u32::try_from(leave_dates.len()).unwrap_or(u32::MAX);
        if requested > balance {
            warn!(
                event_name = "hr.leave.rejected",
                emp_id = %emp_id,
                reason = "insufficient_balance",
                requested,
                available = balance,
                "leave application rejected"
            );
            return Err(DomainError::InsufficientBalance {
                emp_id: emp_id.0.clone(),
                requested,
                available: balance,
            });
        }

        let record =
            records.entry(emp_id.clone()).or_insert_with(|| LeaveRecord::new(emp_id.clone(), balance));
        record.balance -= requested;
        record.history.extend(leave_dates.iter().copied());
        let remaining_balance = record.balance;
        drop(records);

        info!(
            event_name = "hr.leave.applied",
            emp_id = %emp_id,
            days = requested,
            remaining_balance,
            "leave applied"
        );
        Ok(LeaveApplication { emp_id, applied: leave_dates.into_iter().collect(), remaining_balance })
    }

    /// Recorded leave days in chronological order; empty when nothing was taken.
    pub fn get_history(&self, emp_id: &EmployeeId) -> Vec<NaiveDate> {
        self.records
            .read()
            .get(emp_id)
            .map(|record| record.history.iter().copied().collect())
            .unwrap_or_default()
    }

    fn default_balance(&self, emp_id: &EmployeeId) -> Result<u32, DomainError> {
        self.policy
            .default_allotment
            .ok_or_else(|| DomainError::not_found(RecordKind::LeaveRecord, emp_id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::leave::LeaveApplyRequest;
    use crate::errors::{DomainError, RecordKind};
    use crate::ids::EmployeeId;

    use super::{LeaveLedger, LeavePolicy};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).expect("valid January date")
    }

    fn seeded(balance: u32) -> (LeaveLedger, EmployeeId) {
        let ledger = LeaveLedger::new(LeavePolicy::strict());
        let emp_id = EmployeeId::new("E001");
        ledger.set_balance(&emp_id, balance);
        (ledger, emp_id)
    }

    #[test]
    fn applying_leave_deducts_and_records_history() {
        let (ledger, emp_id) = seeded(5);
        let outcome = ledger
            .apply_leave(LeaveApplyRequest::new(emp_id.clone(), [date(11), date(10)]))
            .expect("apply leave");

        assert_eq!(outcome.remaining_balance, 3);
        assert_eq!(outcome.applied, vec![date(10), date(11)]);
        assert_eq!(ledger.get_balance(&emp_id), Ok(3));
        assert_eq!(ledger.get_history(&emp_id), vec![date(10), date(11)]);
    }

    #[test]
    fn repeated_dates_in_one_request_are_charged_once() {
        let (ledger, emp_id) = seeded(2);
        ledger
            .apply_leave(LeaveApplyRequest::new(emp_id.clone(), [date(3), date(3), date(3)]))
            .expect("apply leave");
        assert_eq!(ledger.get_balance(&emp_id), Ok(1));
    }

    #[test]
    fn insufficient_balance_leaves_state_untouched() {
        let (ledger, emp_id) = seeded(1);
        let error = ledger
            .apply_leave(LeaveApplyRequest::new(emp_id.clone(), [date(1), date(2)]))
            .expect_err("balance too small");

        assert_eq!(
            error,
            DomainError::InsufficientBalance { emp_id: "E001".to_string(), requested: 2, available: 1 }
        );
        assert_eq!(ledger.get_balance(&emp_id), Ok(1));
        assert!(ledger.get_history(&emp_id).is_empty());
    }

    #[test]
    fn reapplying_a_recorded_date_is_rejected_whole() {
        let (ledger, emp_id) = seeded(5);
        ledger.apply_leave(LeaveApplyRequest::new(emp_id.clone(), [date(10)])).expect("first");

        let error = ledger
            .apply_leave(LeaveApplyRequest::new(emp_id.clone(), [date(10), date(12)]))
            .expect_err("date 10 already taken");
        assert!(matches!(error, DomainError::InvalidArgument(ref message) if message.contains("2024-01-10")));
        assert_eq!(ledger.get_balance(&emp_id), Ok(4));
        assert_eq!(ledger.get_history(&emp_id), vec![date(10)]);
    }

    #[test]
    fn empty_request_is_invalid() {
        let (ledger, emp_id) = seeded(5);
        let error = ledger
            .apply_leave(LeaveApplyRequest::new(emp_id, Vec::new()))
            .expect_err("empty dates");
        assert!(matches!(error, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn strict_policy_reports_missing_ledger_entry() {
        let ledger = LeaveLedger::new(LeavePolicy::strict());
        let emp_id = EmployeeId::new("E404");
        assert_eq!(
            ledger.get_balance(&emp_id),
            Err(DomainError::not_found(RecordKind::LeaveRecord, "E404"))
        );
        assert!(ledger.apply_leave(LeaveApplyRequest::new(emp_id.clone(), [date(2)])).is_err());
        assert!(ledger.get_history(&emp_id).is_empty());
    }

    #[test]
    fn default_allotment_is_materialized_on_first_application() {
        let ledger = LeaveLedger::new(LeavePolicy::with_default_allotment(20));
        let emp_id = EmployeeId::new("E007");

        assert_eq!(ledger.get_balance(&emp_id), Ok(20));
        ledger.apply_leave(LeaveApplyRequest::new(emp_id.clone(), [date(5)])).expect("apply");
        assert_eq!(ledger.get_balance(&emp_id), Ok(19));
    }

    #[test]
    fn set_balance_keeps_history() {
        let (ledger, emp_id) = seeded(3);
        ledger.apply_leave(LeaveApplyRequest::new(emp_id.clone(), [date(8)])).expect("apply");
        ledger.set_balance(&emp_id, 10);
        assert_eq!(ledger.get_balance(&emp_id), Ok(10));
        assert_eq!(ledger.get_history(&emp_id), vec![date(8)]);
    }
}
