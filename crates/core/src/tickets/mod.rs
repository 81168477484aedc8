use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ticket::{Ticket, TicketCreate, TicketStatus};
use crate::errors::{require_non_empty, DomainError, RecordKind};
use crate::ids::{EmployeeId, IdAllocator, TicketId};
use crate::store::Store;

#[derive(Debug, Default)]
struct TicketState {
    records: Vec<Ticket>,
    index: HashMap<TicketId, usize>,
}

/// Equipment-request tickets and their status lifecycle.
#[derive(Debug)]
pub struct TicketWorkflow {
    ids: Arc<IdAllocator>,
    state: Store<TicketState>,
}

impl TicketWorkflow {
    pub fn new(ids: Arc<IdAllocator>) -> Self {
        Self { ids, state: Store::default() }
    }

    pub fn create(&self, request: TicketCreate) -> Result<Ticket, DomainError> {
        let emp_id = require_non_empty("emp_id", request.emp_id.as_str())?;
        let item = require_non_empty("item", &request.item)?;
        let reason = require_non_empty("reason", &request.reason)?;

        let mut state = self.state.write();
        let ticket = Ticket {
            ticket_id: self.ids.next_ticket_id(),
            emp_id: EmployeeId(emp_id),
            item,
            reason,
            status: TicketStatus::Open,
        };
        let position = state.records.len();
        state.index.insert(ticket.ticket_id.clone(), position);
        state.records.push(ticket.clone());
        drop(state);

        info!(
            event_name = "hr.ticket.created",
            ticket_id = %ticket.ticket_id,
            emp_id = %ticket.emp_id,
            item = %ticket.item,
            "ticket created"
        );
        Ok(ticket)
    }

    /// Moves a ticket along the workflow. CLOSED is terminal and statuses
    /// only move forward; see [`TicketStatus::can_transition_to`].
    pub fn update_status(
        &self,
        ticket_id: &TicketId,
        new_status: TicketStatus,
    ) -> Result<Ticket, DomainError> {
        let mut state = self.state.write();
        let position = state
            .index
            .get(ticket_id)
            .copied()
            .ok_or_else(|| DomainError::not_found(RecordKind::Ticket, ticket_id.as_str()))?;
        let ticket = state
            .records
            .get_mut(position)
            .ok_or_else(|| DomainError::not_found(RecordKind::Ticket, ticket_id.as_str()))?;

        let from = ticket.status;
        if let Err(error) = ticket.transition_to(new_status) {
            warn!(
                event_name = "hr.ticket.transition_rejected",
                ticket_id = %ticket_id,
                from = %from,
                to = %new_status,
                "ticket status update rejected"
            );
            return Err(error);
        }

        info!(
            event_name = "hr.ticket.status_updated",
            ticket_id = %ticket_id,
            from = %from,
            to = %new_status,
            "ticket status updated"
        );
        Ok(ticket.clone())
    }

    /// Like [`update_status`](Self::update_status) but takes the status as caller text.
    pub fn update_status_str(&self, ticket_id: &TicketId, new_status: &str) -> Result<Ticket, DomainError> {
        let status = new_status.parse::<TicketStatus>()?;
        self.update_status(ticket_id, status)
    }

    pub fn get(&self, ticket_id: &TicketId) -> Result<Ticket, DomainError> {
        let state = self.state.read();
        state
            .index
            .get(ticket_id)
            .and_then(|position| state.records.get(*position))
            .cloned()
            .ok_or_else(|| DomainError::not_found(RecordKind::Ticket, ticket_id.as_str()))
    }

    /// Tickets raised by `emp_id` in creation order. `None` means no status filter.
    pub fn list(&self, emp_id: &EmployeeId, status: Option<TicketStatus>) -> Vec<Ticket> {
        self.state
            .read()
            .records
            .iter()
            .filter(|ticket| &ticket.emp_id == emp_id)
            .filter(|ticket| status.map_or(true, |wanted| ticket.status == wanted))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
