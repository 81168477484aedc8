use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::directory::EmployeeDirectory;
use crate::domain::employee::EmployeeCreate;
use crate::domain::leave::LeaveApplyRequest;
use crate::domain::meeting::MeetingCreate;
use crate::domain::ticket::TicketCreate;
use crate::errors::DomainError;
use crate::ids::EmployeeId;
use crate::leave::LeaveLedger;
use crate::meetings::MeetingScheduler;
use crate::tickets::TicketWorkflow;

struct SeedEmployee {
    name: &'static str,
    email: &'static str,
    /// Position of the manager earlier in [`SEED_EMPLOYEES`].
    manager: Option<usize>,
    leave_balance: u32,
    /// `(year, month, day)` of leave already taken, deducted from `leave_balance`.
    leave_taken: &'static [(i32, u32, u32)],
}

const SEED_EMPLOYEES: &[SeedEmployee] = &[
    SeedEmployee {
        name: "Priya Sharma",
        email: "priya.sharma@atliq.com",
        manager: None,
        leave_balance: 20,
        leave_taken: &[],
    },
    SeedEmployee {
        name: "Daniel Brooks",
        email: "daniel.brooks@atliq.com",
        manager: Some(0),
        leave_balance: 15,
        leave_taken: &[(2024, 12, 24), (2024, 12, 26)],
    },
    SeedEmployee {
        name: "Mei Tanaka",
        email: "mei.tanaka@atliq.com",
        manager: Some(1),
        leave_balance: 10,
        leave_taken: &[],
    },
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub seeded: bool,
    pub employees: Vec<EmployeeId>,
    pub tickets: usize,
    pub meetings: usize,
}

impl SeedReport {
    fn skipped() -> Self {
        Self { seeded: false, employees: Vec::new(), tickets: 0, meetings: 0 }
    }
}

/// Loads the baseline records. Does nothing when the directory already has employees,
/// so calling it more than once is harmless.
pub fn seed_services(
    directory: &EmployeeDirectory,
    ledger: &LeaveLedger,
    tickets: &TicketWorkflow,
    meetings: &MeetingScheduler,
) -> Result<SeedReport, DomainError> {
    if !directory.is_empty() {
        info!(event_name = "hr.seed.skipped", employees = directory.len(), "stores already populated");
        return Ok(SeedReport::skipped());
    }

    let mut employees: Vec<EmployeeId> = Vec::with_capacity(SEED_EMPLOYEES.len());
    for seed in SEED_EMPLOYEES {
        let manager_id = seed.manager.and_then(|position| employees.get(position).cloned());
        let employee = directory.add(EmployeeCreate {
            name: seed.name.to_string(),
            email: seed.email.to_string(),
            manager_id,
        })?;

        ledger.set_balance(&employee.emp_id, seed.leave_balance);
        if !seed.leave_taken.is_empty() {
            let dates = seed
                .leave_taken
                .iter()
                .map(|&(year, month, day)| seed_date(year, month, day))
                .collect::<Result<Vec<_>, _>>()?;
            ledger.apply_leave(LeaveApplyRequest::new(employee.emp_id.clone(), dates))?;
        }
        employees.push(employee.emp_id);
    }

    let newest = employees
        .last()
        .cloned()
        .ok_or_else(|| DomainError::InvalidArgument("seed data has no employees".to_string()))?;

    tickets.create(TicketCreate {
        emp_id: newest.clone(),
        item: "Laptop".to_string(),
        reason: "Battery no longer holds charge".to_string(),
    })?;

    let meeting_dt = seed_date(2025, 1, 15)?
        .and_hms_opt(10, 0, 0)
        .ok_or_else(|| DomainError::InvalidArgument("invalid seed meeting time".to_string()))?;
    meetings.schedule(MeetingCreate {
        emp_id: newest,
        meeting_dt,
        topic: "Quarterly check-in".to_string(),
    })?;

    let report = SeedReport { seeded: true, employees, tickets: 1, meetings: 1 };
    info!(
        event_name = "hr.seed.completed",
        employees = report.employees.len(),
        tickets = report.tickets,
        meetings = report.meetings,
        "baseline records loaded"
    );
    Ok(report)
}

fn seed_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DomainError::InvalidArgument(format!("invalid seed date {year}-{month:02}-{day:02}"))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::directory::EmployeeDirectory;
    use crate::ids::{EmployeeId, IdAllocator};
    use crate::leave::{LeaveLedger, LeavePolicy};
    use crate::meetings::MeetingScheduler;
    use crate::tickets::TicketWorkflow;

    use super::seed_services;

    #[test]
    fn seeding_populates_every_store_with_a_manager_chain() {
        let ids = Arc::new(IdAllocator::new());
        let directory = EmployeeDirectory::new(Arc::clone(&ids));
        let ledger = LeaveLedger::new(LeavePolicy::strict());
        let tickets = TicketWorkflow::new(Arc::clone(&ids));
        let meetings = MeetingScheduler::new();

        let report = seed_services(&directory, &ledger, &tickets, &meetings).expect("seed");
        assert!(report.seeded);
        assert_eq!(
            report.employees,
            vec![EmployeeId::new("E001"), EmployeeId::new("E002"), EmployeeId::new("E003")]
        );

        let engineer = directory.get_by_id(&EmployeeId::new("E003")).expect("engineer");
        assert_eq!(engineer.manager_id, Some(EmployeeId::new("E002")));
        assert_eq!(ledger.get_balance(&EmployeeId::new("E002")), Ok(13));
        assert_eq!(ledger.get_history(&EmployeeId::new("E002")).len(), 2);
        assert_eq!(tickets.len(), 1);
        assert_eq!(meetings.list(&EmployeeId::new("E003")).len(), 1);
    }

    #[test]
    fn seeding_twice_is_a_no_op() {
        let ids = Arc::new(IdAllocator::new());
        let directory = EmployeeDirectory::new(Arc::clone(&ids));
        let ledger = LeaveLedger::new(LeavePolicy::strict());
        let tickets = TicketWorkflow::new(Arc::clone(&ids));
        let meetings = MeetingScheduler::new();

        seed_services(&directory, &ledger, &tickets, &meetings).expect("first seed");
        let second = seed_services(&directory, &ledger, &tickets, &meetings).expect("second seed");

        assert!(!second.seeded);
        assert_eq!(directory.len(), 3);
        assert_eq!(tickets.len(), 1);
        assert_eq!(meetings.len(), 1);
    }
}
