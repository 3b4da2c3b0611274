//! `rollcall-directory` — member and group records.
//!
//! The attendance core treats this crate as an external collaborator: it only
//! ever calls [`MemberDirectory::find_by_card_number`] and
//! [`MemberDirectory::get`]. The CRUD surface exists for the management API.

pub mod error;
pub mod group;
pub mod member;

pub use error::DirectoryError;
pub use group::{Group, GroupDirectory, GroupUpdate, InMemoryGroupDirectory};
pub use member::{InMemoryMemberDirectory, Member, MemberDirectory, MemberRole, MemberUpdate};
