//! In-memory HR record core: employee directory, leave ledger, equipment
//! ticket workflow and meeting scheduler, plus the configuration they are
//! built from.

pub mod config;
pub mod directory;
pub mod domain;
pub mod errors;
pub mod ids;
pub mod leave;
pub mod meetings;
pub mod seed;
pub mod services;
pub mod tickets;

mod store;

pub use directory::EmployeeDirectory;
pub use domain::employee::{Employee, EmployeeCreate};
pub use domain::leave::{parse_leave_date, LeaveApplication, LeaveApplyRequest, LeaveRecord};
pub use domain::meeting::{
    parse_meeting_dt, Meeting, MeetingCancelRequest, MeetingCreate, MeetingStatus,
};
pub use domain::ticket::{Ticket, TicketCreate, TicketStatus};
pub use errors::{DomainError, ErrorKind, RecordKind};
pub use ids::{EmployeeId, IdAllocator, TicketId};
pub use leave::{LeaveLedger, LeavePolicy};
pub use meetings::MeetingScheduler;
pub use seed::{seed_services, SeedReport};
pub use services::HrServices;
pub use tickets::TicketWorkflow;
