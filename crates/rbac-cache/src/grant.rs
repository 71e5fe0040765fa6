//! The flattened `(user, project, permission)` triple.

use rbac_model::{Permission, WILDCARD_PROJECT};
use serde::Serialize;

/// One permission granted to one user in one project.
///
/// This is the unit a [`PermissionResolver`](crate::PermissionResolver)
/// produces after flattening roles and role bindings. `project` may be
/// [`WILDCARD_PROJECT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grant {
    pub user: String,
    pub project: String,
    #[serde(flatten)]
    pub permission: Permission,
}

impl Grant {
    /// Creates a grant in a concrete (or wildcard) project.
    #[must_use]
    pub fn new(user: impl Into<String>, project: impl Into<String>, permission: Permission) -> Self {
        Self {
            user: user.into(),
            project: project.into(),
            permission,
        }
    }

    /// Creates a grant under the wildcard project.
    #[must_use]
    pub fn global(user: impl Into<String>, permission: Permission) -> Self {
        Self::new(user, WILDCARD_PROJECT, permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_uses_wildcard_project() {
        let grant = Grant::global("admin", Permission::admin());
        assert_eq!(grant.project, "*");
        assert_eq!(grant.user, "admin");
    }

    #[test]
    fn serializes_flat() {
        let grant = Grant::new("alice", "payments", Permission::admin());
        let json = serde_json::to_value(&grant).expect("serialize");
        assert_eq!(json["user"], "alice");
        assert_eq!(json["project"], "payments");
        assert_eq!(json["actions"][0], "*");
        assert_eq!(json["scopes"][0], "*");
    }
}
