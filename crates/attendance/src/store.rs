//! Append-only persistence for attendance log entries.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use thiserror::Error;

use rollcall_core::{LogEntryId, MemberId};

use crate::entry::{AttendanceLogEntry, AttendanceStatus};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage cannot complete the operation.
    ///
    /// Reads may be retried; a retried append would create a duplicate entry,
    /// so callers must not blindly retry writes.
    #[error("log store unavailable")]
    Unavailable,
}

/// Durable append-only log of attendance entries.
///
/// Implementations must serialize concurrent appends so each entry gets a
/// distinct id, without serializing unrelated reads.
pub trait LogStore: Send + Sync {
    /// Append one entry. Assigns the id; accepts the caller-supplied
    /// timestamp.
    fn append(
        &self,
        member_id: MemberId,
        status: AttendanceStatus,
        timestamp: DateTime<Utc>,
    ) -> Result<AttendanceLogEntry, StoreError>;

    /// All entries in insertion order (equivalently, ascending timestamp).
    fn entries(&self) -> Result<Vec<AttendanceLogEntry>, StoreError>;
}

impl<S> LogStore for Arc<S>
where
    S: LogStore + ?Sized,
{
    fn append(
        &self,
        member_id: MemberId,
        status: AttendanceStatus,
        timestamp: DateTime<Utc>,
    ) -> Result<AttendanceLogEntry, StoreError> {
        (**self).append(member_id, status, timestamp)
    }

    fn entries(&self) -> Result<Vec<AttendanceLogEntry>, StoreError> {
        (**self).entries()
    }
}

/// In-memory log store for dev/test deployments.
#[derive(Debug, Default)]
pub struct InMemoryLogStore {
    inner: RwLock<Vec<AttendanceLogEntry>>,
}

impl InMemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogStore for InMemoryLogStore {
    fn append(
        &self,
        member_id: MemberId,
        status: AttendanceStatus,
        timestamp: DateTime<Utc>,
    ) -> Result<AttendanceLogEntry, StoreError> {
        let entry = AttendanceLogEntry {
            id: LogEntryId::new(),
            member_id,
            status,
            timestamp,
        };

        let mut entries = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        entries.push(entry.clone());
        Ok(entry)
    }

    fn entries(&self) -> Result<Vec<AttendanceLogEntry>, StoreError> {
        let entries = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        Ok(entries.clone())
    }
}
