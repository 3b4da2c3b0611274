//! Read-side search/listing over the log store.
//!
//! Adds no state of its own: every call re-resolves entries against the
//! member directory so renames show up and deleted members drop out.

use chrono::{DateTime, Utc};
use serde::Serialize;

use rollcall_core::{LogEntryId, MemberId};
use rollcall_directory::{DirectoryError, MemberDirectory};

use crate::entry::AttendanceStatus;
use crate::error::AttendanceError;
use crate::store::LogStore;

/// One log entry joined with the member fields callers actually display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry {
    pub id: LogEntryId,
    pub member_id: MemberId,
    pub member_name: String,
    pub card_number: String,
    pub status: AttendanceStatus,
    pub timestamp: DateTime<Utc>,
}

pub struct AttendanceQuery<S, D> {
    store: S,
    directory: D,
}

impl<S, D> AttendanceQuery<S, D>
where
    S: LogStore,
    D: MemberDirectory,
{
    pub fn new(store: S, directory: D) -> Self {
        Self { store, directory }
    }

    /// Full history, insertion order, each entry resolved with display name
    /// and card number. Entries whose member no longer resolves are silently
    /// filtered.
    pub fn list_all(&self) -> Result<Vec<ResolvedEntry>, AttendanceError> {
        self.resolved()
    }

    /// Case-insensitive substring match against the member display name.
    ///
    /// Zero matches is surfaced as [`AttendanceError::NoMatchFound`], not as
    /// an empty list.
    pub fn search_by_member_name(
        &self,
        pattern: &str,
    ) -> Result<Vec<ResolvedEntry>, AttendanceError> {
        if pattern.trim().is_empty() {
            return Err(AttendanceError::Validation(
                "search pattern must not be empty".to_string(),
            ));
        }

        let needle = pattern.to_lowercase();
        let matches: Vec<ResolvedEntry> = self
            .resolved()?
            .into_iter()
            .filter(|e| e.member_name.to_lowercase().contains(&needle))
            .collect();

        if matches.is_empty() {
            return Err(AttendanceError::NoMatchFound);
        }
        Ok(matches)
    }

    fn resolved(&self) -> Result<Vec<ResolvedEntry>, AttendanceError> {
        let mut out = Vec::new();
        for entry in self.store.entries()? {
            let member = match self.directory.get(entry.member_id) {
                Ok(Some(m)) => m,
                // Member deleted since the scan: drop the entry, not an error.
                Ok(None) | Err(DirectoryError::NotFound) => continue,
                Err(_) => return Err(AttendanceError::DirectoryUnavailable),
            };
            out.push(ResolvedEntry {
                id: entry.id,
                member_id: entry.member_id,
                member_name: member.full_name,
                card_number: member.card_number,
                status: entry.status,
                timestamp: entry.timestamp,
            });
        }
        Ok(out)
    }
}
