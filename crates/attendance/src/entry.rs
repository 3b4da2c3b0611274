use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rollcall_core::{LogEntryId, MemberId};

/// What a scan asserts about the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Dismissed,
}

impl core::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AttendanceStatus::Present => f.write_str("present"),
            AttendanceStatus::Dismissed => f.write_str("dismissed"),
        }
    }
}

/// One immutable attendance record.
///
/// # Invariants
/// - Created exactly once by the attendance service, never mutated.
/// - `member_id` referenced a live member at write time (referential validity
///   is checked at the scan, not enforced against later member deletion).
/// - No uniqueness across entries: repeated scans of the same card each get
///   their own entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceLogEntry {
    pub id: LogEntryId,
    pub member_id: MemberId,
    pub status: AttendanceStatus,
    pub timestamp: DateTime<Utc>,
}
