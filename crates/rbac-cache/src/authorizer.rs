//! Request-time authorizer.
//!
//! # Evaluation
//!
//! ```text
//! guest permissions (every authenticated user, every project)
//!         │ no match
//!         ▼
//! current cache generation (user → project → permissions)
//!         │ no match
//!         ▼
//!       deny
//! ```
//!
//! # Audit Logging
//!
//! Every decision is logged:
//! - allowed: debug level
//! - denied: warn level

use crate::config::AuthzConfig;
use crate::{PermissionPolicy, SharedCache};
use rbac_model::{any_allows, Action, Permission, Scope};

/// Guest permissions plus the shared cache.
///
/// # Example
///
/// ```
/// use rbac_cache::{Authorizer, Grant, PermissionPolicy, SharedCache, StaticResolver};
/// use rbac_model::{Action, Permission, Scope};
///
/// let shared = SharedCache::default();
/// let guest = Permission::new([Action::Read], [Scope::Project]).unwrap();
/// let authz = Authorizer::new(vec![guest], shared.clone());
///
/// // Guest permissions apply before any cache is populated.
/// assert!(authz.has_permission("anyone", Action::Read, "payments", Scope::Project));
/// assert!(!authz.has_permission("anyone", Action::Read, "payments", Scope::Dashboard));
///
/// shared
///     .refresh(&StaticResolver::new(vec![Grant::global("admin", Permission::admin())]))
///     .unwrap();
/// assert!(authz.has_permission("admin", Action::Delete, "payments", Scope::Dashboard));
/// ```
#[derive(Debug, Clone)]
pub struct Authorizer {
    guest_permissions: Vec<Permission>,
    cache: SharedCache,
}

impl Authorizer {
    #[must_use]
    pub fn new(guest_permissions: Vec<Permission>, cache: SharedCache) -> Self {
        Self {
            guest_permissions,
            cache,
        }
    }

    /// Creates an authorizer from loaded configuration.
    #[must_use]
    pub fn from_config(config: &AuthzConfig, cache: SharedCache) -> Self {
        Self::new(config.guest_permissions.clone(), cache)
    }

    /// The shared cache this authorizer reads from.
    #[must_use]
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    #[must_use]
    pub fn guest_permissions(&self) -> &[Permission] {
        &self.guest_permissions
    }
}

impl PermissionPolicy for Authorizer {
    fn has_permission(&self, user: &str, action: Action, project: &str, scope: Scope) -> bool {
        if any_allows(&self.guest_permissions, action, scope) {
            tracing::debug!(
                user,
                %action,
                project,
                %scope,
                source = "guest",
                "permission allowed"
            );
            return true;
        }

        let snapshot = self.cache.snapshot();
        if snapshot.has_permission(user, action, project, scope) {
            tracing::debug!(
                user,
                %action,
                project,
                %scope,
                source = "cache",
                "permission allowed"
            );
            true
        } else {
            tracing::warn!(
                user,
                %action,
                project,
                %scope,
                generation = self.cache.generation(),
                "permission denied"
            );
            false
        }
    }
}
