//! `rollcall-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod authorize;
pub mod claims;
pub mod credentials;
pub mod jwt;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{authorize, AuthzError, OperationAuthorization, Principal};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use credentials::{CredentialError, CredentialStore, InMemoryCredentialStore, UserAccount};
pub use jwt::{Hs256TokenCodec, JwtError, JwtValidator};
pub use permissions::Permission;
pub use principal::PrincipalId;
pub use roles::Role;
