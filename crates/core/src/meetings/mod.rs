use tracing::{info, warn};

use crate::domain::meeting::{Meeting, MeetingCancelRequest, MeetingCreate, MeetingStatus};
use crate::errors::{require_non_empty, DomainError, RecordKind};
use crate::ids::EmployeeId;
use crate::store::Store;

/// Meetings keyed by `(emp_id, meeting_dt, topic)`. Cancelled entries are kept.
#[derive(Debug, Default)]
pub struct MeetingScheduler {
    meetings: Store<Vec<Meeting>>,
}

impl MeetingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a meeting unless an active one already has the same triple.
    pub fn schedule(&self, request: MeetingCreate) -> Result<Meeting, DomainError> {
        let emp_id = EmployeeId(require_non_empty("emp_id", request.emp_id.as_str())?);
        let topic = require_non_empty("topic", &request.topic)?;
        let meeting_dt = request.meeting_dt;

        let mut meetings = self.meetings.write();
        let conflict = meetings
            .iter()
            .any(|meeting| meeting.is_active() && meeting.matches_triple(&emp_id, meeting_dt, &topic));
        if conflict {
            warn!(
                event_name = "hr.meeting.conflict",
                emp_id = %emp_id,
                meeting_dt = %meeting_dt,
                "meeting already scheduled"
            );
            return Err(DomainError::MeetingConflict { emp_id: emp_id.0, meeting_dt, topic });
        }

        let meeting = Meeting { emp_id, meeting_dt, topic, status: MeetingStatus::Scheduled };
        meetings.push(meeting.clone());
        drop(meetings);

        info!(
            event_name = "hr.meeting.scheduled",
            emp_id = %meeting.emp_id,
            meeting_dt = %meeting.meeting_dt,
            topic = %meeting.topic,
            "meeting scheduled"
        );
        Ok(meeting)
    }

    /// Cancels the active meeting matching the request.
    ///
    /// Without a topic the slot `(emp_id, meeting_dt)` must hold exactly one
    /// active meeting; several candidates are reported as ambiguous and
    /// nothing is cancelled.
    pub fn cancel(&self, request: MeetingCancelRequest) -> Result<Meeting, DomainError> {
        let MeetingCancelRequest { emp_id, meeting_dt, topic } = request;
        let topic = topic.map(|topic| topic.trim().to_string()).filter(|topic| !topic.is_empty());

        let mut meetings = self.meetings.write();
        let candidates = meetings
            .iter()
            .enumerate()
            .filter(|(_, meeting)| meeting.is_active() && meeting.matches_slot(&emp_id, meeting_dt))
            .filter(|(_, meeting)| topic.as_deref().map_or(true, |wanted| meeting.topic == wanted))
            .map(|(position, _)| position)
            .collect::<Vec<_>>();

        let position = match candidates.as_slice() {
            [] => {
                let key = match &topic {
                    Some(topic) => format!("{emp_id} @ {meeting_dt} ({topic})"),
                    None => format!("{emp_id} @ {meeting_dt}"),
                };
                return Err(DomainError::not_found(RecordKind::Meeting, key));
            }
            [only] => *only,
            many => {
                let topics = many
                    .iter()
                    .filter_map(|position| meetings.get(*position))
                    .map(|meeting| meeting.topic.clone())
                    .collect();
                return Err(DomainError::AmbiguousCancellation {
                    emp_id: emp_id.0,
                    meeting_dt,
                    topics,
                });
            }
        };

        let meeting = meetings
            .get_mut(position)
            .ok_or_else(|| DomainError::not_found(RecordKind::Meeting, emp_id.as_str()))?;
        meeting.status = MeetingStatus::Cancelled;
        let cancelled = meeting.clone();
        drop(meetings);

        info!(
            event_name = "hr.meeting.cancelled",
            emp_id = %cancelled.emp_id,
            meeting_dt = %cancelled.meeting_dt,
            topic = %cancelled.topic,
            "meeting cancelled"
        );
        Ok(cancelled)
    }

    /// All meetings for `emp_id`, both statuses, earliest first.
    pub fn list(&self, emp_id: &EmployeeId) -> Vec<Meeting> {
        let mut listed = self
            .meetings
            .read()
            .iter()
            .filter(|meeting| &meeting.emp_id == emp_id)
            .cloned()
            .collect::<Vec<_>>();
        listed.sort_by_key(|meeting| meeting.meeting_dt);
        listed
    }

    pub fn len(&self) -> usize {
        self.meetings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
