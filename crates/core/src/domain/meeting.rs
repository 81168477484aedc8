use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::ids::EmployeeId;

const NAIVE_FORMATS: &[&str] =
    &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    Scheduled,
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingCreate {
    pub emp_id: EmployeeId,
    pub meeting_dt: NaiveDateTime,
    pub topic: String,
}

/// Identifies the meeting(s) to cancel. A missing topic matches every topic at the slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingCancelRequest {
    pub emp_id: EmployeeId,
    pub meeting_dt: NaiveDateTime,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub emp_id: EmployeeId,
    pub meeting_dt: NaiveDateTime,
    pub topic: String,
    pub status: MeetingStatus,
}

impl Meeting {
    pub fn is_active(&self) -> bool {
        self.status == MeetingStatus::Scheduled
    }

    pub fn matches_triple(&self, emp_id: &EmployeeId, meeting_dt: NaiveDateTime, topic: &str) -> bool {
        self.matches_slot(emp_id, meeting_dt) && self.topic == topic
    }

    pub fn matches_slot(&self, emp_id: &EmployeeId, meeting_dt: NaiveDateTime) -> bool {
        &self.emp_id == emp_id && self.meeting_dt == meeting_dt
    }
}

/// Accepts RFC 3339 (normalized to UTC) or a naive `YYYY-MM-DD[T ]HH:MM[:SS]` timestamp.
pub fn parse_meeting_dt(value: &str) -> Result<NaiveDateTime, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidArgument("meeting_dt is required".to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            DomainError::InvalidArgument(format!(
                "meeting_dt `{trimmed}` is not a valid timestamp (expected YYYY-MM-DDTHH:MM[:SS])"
            ))
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::parse_meeting_dt;

    #[test]
    fn parses_naive_and_offset_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|date| date.and_hms_opt(10, 30, 0))
            .expect("valid fixture timestamp");

        assert_eq!(parse_meeting_dt("2024-01-15T10:30:00"), Ok(expected));
        assert_eq!(parse_meeting_dt("2024-01-15 10:30"), Ok(expected));
        assert_eq!(parse_meeting_dt("2024-01-15T12:30:00+02:00"), Ok(expected));
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert!(parse_meeting_dt("next tuesday").is_err());
        assert!(parse_meeting_dt("   ").is_err());
        assert!(parse_meeting_dt("2024-02-30T10:00:00").is_err());
    }
}
