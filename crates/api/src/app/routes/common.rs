use rollcall_auth::{OperationAuthorization, Permission};

/// Small helper wrapper to associate required permissions with an operation.
pub struct OpAuth {
    pub required: Vec<Permission>,
}

impl OpAuth {
    pub fn one(perm: &'static str) -> Self {
        Self {
            required: vec![Permission::new(perm)],
        }
    }
}

impl OperationAuthorization for OpAuth {
    fn required_permissions(&self) -> &[Permission] {
        &self.required
    }
}
