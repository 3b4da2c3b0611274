//! API-side authorization guard for mutating/reading operations.
//!
//! This enforces authorization at the request boundary (before reaching the
//! directories or the attendance core), keeping the domain crates
//! auth-agnostic.

use rollcall_auth::{authorize, AuthzError, OperationAuthorization, Permission, Principal};

use crate::context::PrincipalContext;

/// Check authorization for an operation in the current request context.
///
/// This is intended to be called **before** touching any store.
pub fn authorize_operation<O: OperationAuthorization>(
    principal: &PrincipalContext,
    operation: &O,
) -> Result<(), AuthzError> {
    let principal = Principal {
        principal_id: principal.principal_id(),
        roles: principal.roles().to_vec(),
        permissions: permissions_from_roles(principal.roles()),
    };

    for perm in operation.required_permissions() {
        authorize(&principal, perm)?;
    }

    Ok(())
}

/// Minimal role→permission mapping stub.
///
/// This is intentionally simple until a real policy source exists (e.g.
/// DB-backed). Convention: "admin" grants all permissions; "leader" can read
/// the directories and the attendance history.
fn permissions_from_roles(roles: &[rollcall_auth::Role]) -> Vec<Permission> {
    if roles.iter().any(|r| r.as_str() == "admin") {
        return vec![Permission::new("*")];
    }

    if roles.iter().any(|r| r.as_str() == "leader") {
        return vec![
            Permission::new("members.read"),
            Permission::new("groups.read"),
            Permission::new("attendance.logs.read"),
        ];
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_auth::{PrincipalId, Role};

    struct Op {
        required: Vec<Permission>,
    }

    impl OperationAuthorization for Op {
        fn required_permissions(&self) -> &[Permission] {
            &self.required
        }
    }

    #[test]
    fn admin_can_do_anything() {
        let ctx = PrincipalContext::new(PrincipalId::new(), vec![Role::new("admin")]);
        let op = Op {
            required: vec![Permission::new("members.delete")],
        };
        assert!(authorize_operation(&ctx, &op).is_ok());
    }

    #[test]
    fn leader_can_read_but_not_mutate() {
        let ctx = PrincipalContext::new(PrincipalId::new(), vec![Role::new("leader")]);

        let read = Op {
            required: vec![Permission::new("members.read")],
        };
        assert!(authorize_operation(&ctx, &read).is_ok());

        let mutate = Op {
            required: vec![Permission::new("members.delete")],
        };
        assert!(authorize_operation(&ctx, &mutate).is_err());
    }

    #[test]
    fn plain_member_has_no_permissions() {
        let ctx = PrincipalContext::new(PrincipalId::new(), vec![Role::new("member")]);
        let op = Op {
            required: vec![Permission::new("members.read")],
        };
        assert!(authorize_operation(&ctx, &op).is_err());
    }
}
