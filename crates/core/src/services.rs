use std::sync::Arc;

use crate::config::AppConfig;
use crate::directory::EmployeeDirectory;
use crate::errors::DomainError;
use crate::ids::IdAllocator;
use crate::leave::{LeaveLedger, LeavePolicy};
use crate::meetings::MeetingScheduler;
use crate::seed::{seed_services, SeedReport};
use crate::tickets::TicketWorkflow;

/// The four stores, built once at startup and shared by handle with the adapter.
#[derive(Clone, Debug)]
pub struct HrServices {
    pub ids: Arc<IdAllocator>,
    pub directory: Arc<EmployeeDirectory>,
    pub leave: Arc<LeaveLedger>,
    pub tickets: Arc<TicketWorkflow>,
    pub meetings: Arc<MeetingScheduler>,
}

impl HrServices {
    pub fn new(policy: LeavePolicy) -> Self {
        let ids = Arc::new(IdAllocator::new());
        Self {
            directory: Arc::new(EmployeeDirectory::new(Arc::clone(&ids))),
            leave: Arc::new(LeaveLedger::new(policy)),
            tickets: Arc::new(TicketWorkflow::new(Arc::clone(&ids))),
            meetings: Arc::new(MeetingScheduler::new()),
            ids,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.leave_policy())
    }

    pub fn seed(&self) -> Result<SeedReport, DomainError> {
        seed_services(&self.directory, &self.leave, &self.tickets, &self.meetings)
    }
}
