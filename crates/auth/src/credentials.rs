//! Credential storage and verification (login backing store).
//!
//! Passwords are stored as salted SHA-256 digests; the raw password never
//! leaves the `register`/`verify` call frames.

use std::collections::HashMap;
use std::sync::RwLock;

use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::{PrincipalId, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("username already registered")]
    AlreadyRegistered,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("credential store unavailable")]
    Unavailable,
}

/// One registered account.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub principal_id: PrincipalId,
    pub username: String,
    pub roles: Vec<Role>,
    password_hash: String,
    salt: String,
}

impl UserAccount {
    fn matches_password(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_hash
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Account registry consulted at login.
pub trait CredentialStore: Send + Sync {
    fn register(
        &self,
        username: &str,
        password: &str,
        roles: Vec<Role>,
    ) -> Result<UserAccount, CredentialError>;

    /// Verify a username/password pair.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller (`InvalidCredentials` for both).
    fn verify(&self, username: &str, password: &str) -> Result<UserAccount, CredentialError>;
}

/// In-memory credential store for dev/test deployments.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<String, UserAccount>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn register(
        &self,
        username: &str,
        password: &str,
        roles: Vec<Role>,
    ) -> Result<UserAccount, CredentialError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| CredentialError::Unavailable)?;

        if accounts.contains_key(username) {
            return Err(CredentialError::AlreadyRegistered);
        }

        let salt = Uuid::now_v7().simple().to_string();
        let account = UserAccount {
            principal_id: PrincipalId::new(),
            username: username.to_string(),
            roles,
            password_hash: hash_password(&salt, password),
            salt,
        };
        accounts.insert(username.to_string(), account.clone());
        Ok(account)
    }

    fn verify(&self, username: &str, password: &str) -> Result<UserAccount, CredentialError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| CredentialError::Unavailable)?;

        let account = accounts
            .get(username)
            .ok_or(CredentialError::InvalidCredentials)?;

        if account.matches_password(password) {
            Ok(account.clone())
        } else {
            Err(CredentialError::InvalidCredentials)
        }
    }
}
