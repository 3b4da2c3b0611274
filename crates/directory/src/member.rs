//! Member records and the directory the attendance core resolves cards
//! against.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use rollcall_core::{GroupId, MemberId};

use crate::error::DirectoryError;

/// Congregation-level role of a member (distinct from API auth roles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    #[default]
    Member,
    Leader,
}

/// A registered member.
///
/// The attendance core only needs `id`, `full_name` and `card_number`; the
/// remaining fields back the management API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub full_name: String,
    /// Unique identifier printed on the member's scan card.
    pub card_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub group_ids: Vec<GroupId>,
}

impl Member {
    pub fn new(full_name: impl Into<String>, card_number: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            full_name: full_name.into(),
            card_number: card_number.into(),
            email: None,
            phone_number: None,
            role: MemberRole::Member,
            group_ids: Vec::new(),
        }
    }
}

/// Partial update applied to an existing member (PATCH semantics).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberUpdate {
    pub full_name: Option<String>,
    pub card_number: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<MemberRole>,
    pub group_ids: Option<Vec<GroupId>>,
}

/// Lookup + CRUD surface over member records.
///
/// `find_by_card_number` is the only operation the attendance core depends
/// on; everything else serves the management endpoints.
pub trait MemberDirectory: Send + Sync {
    fn find_by_card_number(&self, card_number: &str) -> Result<Option<Member>, DirectoryError>;

    fn get(&self, id: MemberId) -> Result<Option<Member>, DirectoryError>;

    fn insert(&self, member: Member) -> Result<Member, DirectoryError>;

    fn update(&self, id: MemberId, update: MemberUpdate) -> Result<Member, DirectoryError>;

    fn remove(&self, id: MemberId) -> Result<(), DirectoryError>;

    fn list(&self) -> Result<Vec<Member>, DirectoryError>;
}

impl<D> MemberDirectory for std::sync::Arc<D>
where
    D: MemberDirectory + ?Sized,
{
    fn find_by_card_number(&self, card_number: &str) -> Result<Option<Member>, DirectoryError> {
        (**self).find_by_card_number(card_number)
    }

    fn get(&self, id: MemberId) -> Result<Option<Member>, DirectoryError> {
        (**self).get(id)
    }

    fn insert(&self, member: Member) -> Result<Member, DirectoryError> {
        (**self).insert(member)
    }

    fn update(&self, id: MemberId, update: MemberUpdate) -> Result<Member, DirectoryError> {
        (**self).update(id, update)
    }

    fn remove(&self, id: MemberId) -> Result<(), DirectoryError> {
        (**self).remove(id)
    }

    fn list(&self) -> Result<Vec<Member>, DirectoryError> {
        (**self).list()
    }
}

/// In-memory member directory for dev/test deployments.
#[derive(Debug, Default)]
pub struct InMemoryMemberDirectory {
    inner: RwLock<HashMap<MemberId, Member>>,
}

impl InMemoryMemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemberDirectory for InMemoryMemberDirectory {
    fn find_by_card_number(&self, card_number: &str) -> Result<Option<Member>, DirectoryError> {
        let map = self.inner.read().map_err(|_| DirectoryError::Unavailable)?;
        Ok(map.values().find(|m| m.card_number == card_number).cloned())
    }

    fn get(&self, id: MemberId) -> Result<Option<Member>, DirectoryError> {
        let map = self.inner.read().map_err(|_| DirectoryError::Unavailable)?;
        Ok(map.get(&id).cloned())
    }

    fn insert(&self, member: Member) -> Result<Member, DirectoryError> {
        let mut map = self.inner.write().map_err(|_| DirectoryError::Unavailable)?;

        if map.values().any(|m| m.card_number == member.card_number) {
            return Err(DirectoryError::Conflict(format!(
                "card number '{}' already registered",
                member.card_number
            )));
        }

        map.insert(member.id, member.clone());
        Ok(member)
    }

    fn update(&self, id: MemberId, update: MemberUpdate) -> Result<Member, DirectoryError> {
        let mut map = self.inner.write().map_err(|_| DirectoryError::Unavailable)?;

        if let Some(card) = &update.card_number {
            if map.values().any(|m| m.id != id && &m.card_number == card) {
                return Err(DirectoryError::Conflict(format!(
                    "card number '{card}' already registered"
                )));
            }
        }

        let member = map.get_mut(&id).ok_or(DirectoryError::NotFound)?;
        if let Some(v) = update.full_name {
            member.full_name = v;
        }
        if let Some(v) = update.card_number {
            member.card_number = v;
        }
        if let Some(v) = update.email {
            member.email = Some(v);
        }
        if let Some(v) = update.phone_number {
            member.phone_number = Some(v);
        }
        if let Some(v) = update.role {
            member.role = v;
        }
        if let Some(v) = update.group_ids {
            member.group_ids = v;
        }
        Ok(member.clone())
    }

    fn remove(&self, id: MemberId) -> Result<(), DirectoryError> {
        let mut map = self.inner.write().map_err(|_| DirectoryError::Unavailable)?;
        map.remove(&id).map(|_| ()).ok_or(DirectoryError::NotFound)
    }

    fn list(&self) -> Result<Vec<Member>, DirectoryError> {
        let map = self.inner.read().map_err(|_| DirectoryError::Unavailable)?;
        let mut members: Vec<Member> = map.values().cloned().collect();
        members.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_find_by_card_number() {
        let dir = InMemoryMemberDirectory::new();
        let member = dir.insert(Member::new("Jane Doe", "C-1001")).unwrap();

        let found = dir.find_by_card_number("C-1001").unwrap().unwrap();
        assert_eq!(found.id, member.id);
        assert_eq!(found.full_name, "Jane Doe");
    }

    #[test]
    fn unknown_card_resolves_to_none() {
        let dir = InMemoryMemberDirectory::new();
        assert_eq!(dir.find_by_card_number("C-9999").unwrap(), None);
    }

    #[test]
    fn duplicate_card_number_is_a_conflict() {
        let dir = InMemoryMemberDirectory::new();
        dir.insert(Member::new("Jane Doe", "C-1001")).unwrap();

        let err = dir.insert(Member::new("John Roe", "C-1001")).unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict(_)));
    }

    #[test]
    fn update_patches_only_provided_fields() {
        let dir = InMemoryMemberDirectory::new();
        let member = dir.insert(Member::new("Jane Doe", "C-1001")).unwrap();

        let updated = dir
            .update(
                member.id,
                MemberUpdate {
                    email: Some("jane@example.com".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.full_name, "Jane Doe");
        assert_eq!(updated.card_number, "C-1001");
        assert_eq!(updated.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn update_cannot_steal_another_members_card() {
        let dir = InMemoryMemberDirectory::new();
        dir.insert(Member::new("Jane Doe", "C-1001")).unwrap();
        let other = dir.insert(Member::new("John Roe", "C-1002")).unwrap();

        let err = dir
            .update(
                other.id,
                MemberUpdate {
                    card_number: Some("C-1001".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict(_)));
    }

    #[test]
    fn remove_missing_member_is_not_found() {
        let dir = InMemoryMemberDirectory::new();
        assert_eq!(dir.remove(MemberId::new()).unwrap_err(), DirectoryError::NotFound);
    }

    #[test]
    fn list_is_sorted_by_name() {
        let dir = InMemoryMemberDirectory::new();
        dir.insert(Member::new("Zoe Quinn", "C-3")).unwrap();
        dir.insert(Member::new("Anna Smith", "C-1")).unwrap();

        let names: Vec<String> = dir.list().unwrap().into_iter().map(|m| m.full_name).collect();
        assert_eq!(names, vec!["Anna Smith", "Zoe Quinn"]);
    }
}
