//! Group records (congregation subdivisions).
//!
//! Groups are not consulted by the attendance core; they exist for the
//! management API.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use rollcall_core::{GroupId, MemberId};

use crate::error::DirectoryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Unique within the directory.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<MemberId>,
    #[serde(default)]
    pub member_ids: Vec<MemberId>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            description: None,
            leader_id: None,
            member_ids: Vec::new(),
        }
    }
}

/// Partial update applied to an existing group (PATCH semantics).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub leader_id: Option<MemberId>,
    pub member_ids: Option<Vec<MemberId>>,
}

pub trait GroupDirectory: Send + Sync {
    fn get(&self, id: GroupId) -> Result<Option<Group>, DirectoryError>;

    fn insert(&self, group: Group) -> Result<Group, DirectoryError>;

    fn update(&self, id: GroupId, update: GroupUpdate) -> Result<Group, DirectoryError>;

    fn remove(&self, id: GroupId) -> Result<(), DirectoryError>;

    fn list(&self) -> Result<Vec<Group>, DirectoryError>;
}

/// In-memory group directory for dev/test deployments.
#[derive(Debug, Default)]
pub struct InMemoryGroupDirectory {
    inner: RwLock<HashMap<GroupId, Group>>,
}

impl InMemoryGroupDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupDirectory for InMemoryGroupDirectory {
    fn get(&self, id: GroupId) -> Result<Option<Group>, DirectoryError> {
        let map = self.inner.read().map_err(|_| DirectoryError::Unavailable)?;
        Ok(map.get(&id).cloned())
    }

    fn insert(&self, group: Group) -> Result<Group, DirectoryError> {
        let mut map = self.inner.write().map_err(|_| DirectoryError::Unavailable)?;

        if map.values().any(|g| g.name == group.name) {
            return Err(DirectoryError::Conflict(format!(
                "group '{}' already exists",
                group.name
            )));
        }

        map.insert(group.id, group.clone());
        Ok(group)
    }

    fn update(&self, id: GroupId, update: GroupUpdate) -> Result<Group, DirectoryError> {
        let mut map = self.inner.write().map_err(|_| DirectoryError::Unavailable)?;

        if let Some(name) = &update.name {
            if map.values().any(|g| g.id != id && &g.name == name) {
                return Err(DirectoryError::Conflict(format!(
                    "group '{name}' already exists"
                )));
            }
        }

        let group = map.get_mut(&id).ok_or(DirectoryError::NotFound)?;
        if let Some(v) = update.name {
            group.name = v;
        }
        if let Some(v) = update.description {
            group.description = Some(v);
        }
        if let Some(v) = update.leader_id {
            group.leader_id = Some(v);
        }
        if let Some(v) = update.member_ids {
            group.member_ids = v;
        }
        Ok(group.clone())
    }

    fn remove(&self, id: GroupId) -> Result<(), DirectoryError> {
        let mut map = self.inner.write().map_err(|_| DirectoryError::Unavailable)?;
        map.remove(&id).map(|_| ()).ok_or(DirectoryError::NotFound)
    }

    fn list(&self) -> Result<Vec<Group>, DirectoryError> {
        let map = self.inner.read().map_err(|_| DirectoryError::Unavailable)?;
        let mut groups: Vec<Group> = map.values().cloned().collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }
}
