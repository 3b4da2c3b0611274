//! The message published to observers after a scan is committed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entry::AttendanceStatus;

/// Event name observers subscribe to for presence scans.
pub const ATTENDANCE_UPDATED: &str = "attendanceUpdated";

/// Event name observers subscribe to for dismissal scans.
pub const DISMISSAL_NOTIFICATION: &str = "dismissalNotification";

/// Fire-and-forget notification of one committed attendance entry.
///
/// Serializes to the observer wire payload `{member, status, timestamp}`;
/// the topic travels out-of-band as the event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceNotice {
    #[serde(skip)]
    pub topic: &'static str,
    /// Member display name.
    pub member: String,
    pub status: AttendanceStatus,
    pub timestamp: DateTime<Utc>,
}

impl AttendanceNotice {
    pub fn new(member: String, status: AttendanceStatus, timestamp: DateTime<Utc>) -> Self {
        let topic = match status {
            AttendanceStatus::Present => ATTENDANCE_UPDATED,
            AttendanceStatus::Dismissed => DISMISSAL_NOTIFICATION,
        };
        Self {
            topic,
            member,
            status,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_follows_status() {
        let now = Utc::now();
        let present = AttendanceNotice::new("Jane Doe".into(), AttendanceStatus::Present, now);
        assert_eq!(present.topic, ATTENDANCE_UPDATED);

        let dismissed = AttendanceNotice::new("Jane Doe".into(), AttendanceStatus::Dismissed, now);
        assert_eq!(dismissed.topic, DISMISSAL_NOTIFICATION);
    }

    #[test]
    fn wire_payload_has_member_status_timestamp_only() {
        let notice = AttendanceNotice::new(
            "Jane Doe".into(),
            AttendanceStatus::Present,
            Utc::now(),
        );
        let json = serde_json::to_value(&notice).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["member"], "Jane Doe");
        assert_eq!(obj["status"], "present");
        assert!(obj.contains_key("timestamp"));
    }
}
