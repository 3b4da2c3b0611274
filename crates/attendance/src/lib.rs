//! `rollcall-attendance` — the real-time attendance event pipeline.
//!
//! Flow: card-scan signal → member resolution ([`rollcall_directory`]) →
//! append to the [`store::LogStore`] → publish an [`notice::AttendanceNotice`]
//! on the broadcast bus → observers receive it live. History is served by
//! [`query::AttendanceQuery`].

pub mod entry;
pub mod error;
pub mod notice;
pub mod query;
pub mod service;
pub mod store;

pub use entry::{AttendanceLogEntry, AttendanceStatus};
pub use error::AttendanceError;
pub use notice::AttendanceNotice;
pub use query::{AttendanceQuery, ResolvedEntry};
pub use service::AttendanceService;
pub use store::{InMemoryLogStore, LogStore, StoreError};
