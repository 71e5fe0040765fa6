//! Permission policy trait.
//!
//! # Architecture
//!
//! ```text
//! PermissionPolicy trait (THIS)
//!          │
//!          ├── PermissionCache   ← one generation, no logging
//!          └── Authorizer        ← guest permissions + SharedCache + audit log
//! ```
//!
//! Request middleware holds a `&dyn PermissionPolicy` and calls it once per
//! request with the authenticated user, the action implied by the
//! operation, the target project and the resource scope.

use crate::PermissionCache;
use rbac_model::{Action, Scope};
use tracing::debug;

/// Default-deny access decision.
///
/// Implementations must be total: every input yields `true` or `false`,
/// never a panic, and anything uncertain yields `false`.
pub trait PermissionPolicy: Send + Sync {
    /// Returns `true` if `user` may perform `action` on `scope` in `project`.
    fn has_permission(&self, user: &str, action: Action, project: &str, scope: Scope) -> bool;

    /// Like [`has_permission`](Self::has_permission), for untyped input.
    ///
    /// An action or scope outside the closed enumerations is denied. The
    /// wildcard markers are grant-side only and are denied here too: a
    /// request names one concrete action and one concrete scope.
    fn check_raw(&self, user: &str, action: &str, project: &str, scope: &str) -> bool {
        let action = match action.parse::<Action>() {
            Ok(a) if !a.is_wildcard() => a,
            Ok(_) | Err(_) => {
                debug!(user, action, "permission denied: unrecognized action");
                return false;
            }
        };
        let scope = match scope.parse::<Scope>() {
            Ok(s) if !s.is_wildcard() => s,
            Ok(_) | Err(_) => {
                debug!(user, scope, "permission denied: unrecognized scope");
                return false;
            }
        };
        self.has_permission(user, action, project, scope)
    }
}

impl PermissionPolicy for PermissionCache {
    fn has_permission(&self, user: &str, action: Action, project: &str, scope: Scope) -> bool {
        PermissionCache::has_permission(self, user, action, project, scope)
    }
}
