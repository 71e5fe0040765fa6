//! Per-user, per-project permission index.
//!
//! # Layout
//!
//! ```text
//! users ─┬─ "alice" ─┬─ "*"        → [Permission, ...]   (every project)
//!        │           └─ "payments" → [Permission, ...]
//!        └─ "bob"   ─── "billing"  → [Permission, ...]
//! ```
//!
//! A query touches at most two lists, both owned by the requesting user:
//! the wildcard-project list and the exact-project list. Cost is bounded by
//! that user's own entries, independent of how many other users or
//! projects the cache holds.
//!
//! # Lifecycle
//!
//! A cache is built in one pass (usually [`PermissionCache::from_grants`]),
//! then published read-only through [`SharedCache`](crate::SharedCache).
//! It is never patched after publication; a permission change upstream
//! produces a new cache.

use crate::{CacheError, Grant};
use rbac_model::{any_allows, is_wildcard_project, Action, Permission, Scope, WILDCARD_PROJECT};
use std::collections::HashMap;

/// Permissions of one user, keyed by project name.
pub type ProjectPermissions = HashMap<String, Vec<Permission>>;

/// Immutable-once-published index from `(user, project)` to permissions.
///
/// # Example
///
/// ```
/// use rbac_cache::PermissionCache;
/// use rbac_model::{Action, Permission, Scope, WILDCARD_PROJECT};
///
/// let mut cache = PermissionCache::new();
/// cache.insert("admin", WILDCARD_PROJECT, Permission::admin());
/// cache.insert(
///     "alice",
///     "payments",
///     Permission::new([Action::Read], [Scope::Dashboard]).unwrap(),
/// );
///
/// assert!(cache.has_permission("admin", Action::Delete, "anything", Scope::Secret));
/// assert!(cache.has_permission("alice", Action::Read, "payments", Scope::Dashboard));
/// assert!(!cache.has_permission("alice", Action::Read, "billing", Scope::Dashboard));
/// assert!(!cache.has_permission("mallory", Action::Read, "payments", Scope::Dashboard));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PermissionCache {
    users: HashMap<String, ProjectPermissions>,
    entries: usize,
}

impl PermissionCache {
    /// Creates an empty cache. Every query against it is denied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cache from resolver output in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::EmptyUser`] or [`CacheError::EmptyProject`]
    /// for a grant with an empty identifier. Nothing is returned on error,
    /// so a partially built cache can never be published.
    pub fn from_grants(grants: impl IntoIterator<Item = Grant>) -> Result<Self, CacheError> {
        let mut cache = Self::new();
        for grant in grants {
            if grant.user.is_empty() {
                return Err(CacheError::EmptyUser {
                    project: grant.project,
                });
            }
            if grant.project.is_empty() {
                return Err(CacheError::EmptyProject { user: grant.user });
            }
            cache.insert(grant.user, grant.project, grant.permission);
        }
        Ok(cache)
    }

    /// Appends `permission` to the list at `(user, project)`.
    ///
    /// Creates the user map and the project list on first use. Entries are
    /// never merged or deduplicated; evaluation is a disjunction, so a
    /// duplicate is harmless.
    ///
    /// # Panics
    ///
    /// Panics if `user` or `project` is empty. Both are construction-time
    /// contract violations; use [`from_grants`](Self::from_grants) for
    /// input that has not been checked.
    pub fn insert(
        &mut self,
        user: impl Into<String>,
        project: impl Into<String>,
        permission: Permission,
    ) {
        let user = user.into();
        let project = project.into();
        assert!(!user.is_empty(), "permission cache user must not be empty");
        assert!(
            !project.is_empty(),
            "permission cache project must not be empty"
        );

        self.users
            .entry(user)
            .or_default()
            .entry(project)
            .or_default()
            .push(permission);
        self.entries += 1;
    }

    /// Returns `true` if `user` may perform `action` on `scope` in `project`.
    ///
    /// Consults the user's wildcard-project list, then the exact-project
    /// list, stopping at the first permission that allows the request.
    /// Unknown users, unknown projects and unmatched scopes all deny.
    /// Never panics and never mutates the cache.
    #[must_use]
    pub fn has_permission(&self, user: &str, action: Action, project: &str, scope: Scope) -> bool {
        any_allows(self.candidates(user, project), action, scope)
    }

    /// The permissions a query for `(user, project)` scans, in scan order.
    ///
    /// Wildcard-project entries come first, then exact-project entries.
    /// When `project` is itself the wildcard project, its list is yielded
    /// once.
    pub fn candidates<'a>(
        &'a self,
        user: &str,
        project: &str,
    ) -> impl Iterator<Item = &'a Permission> + 'a {
        let empty: &'a [Permission] = &[];
        let (global, exact) = match self.users.get(user) {
            Some(projects) => {
                let global = projects
                    .get(WILDCARD_PROJECT)
                    .map_or(empty, Vec::as_slice);
                let exact = if is_wildcard_project(project) {
                    empty
                } else {
                    projects.get(project).map_or(empty, Vec::as_slice)
                };
                (global, exact)
            }
            None => (empty, empty),
        };
        global.iter().chain(exact)
    }

    /// All permissions held by `user`, keyed by project.
    #[must_use]
    pub fn permissions_for(&self, user: &str) -> Option<&ProjectPermissions> {
        self.users.get(user)
    }

    /// Number of users with at least one entry.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Total number of inserted permissions, duplicates included.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}

impl FromIterator<Grant> for PermissionCache {
    /// Builds a cache from grants already known to be well-formed.
    ///
    /// # Panics
    ///
    /// Panics on an empty user or project, like [`PermissionCache::insert`].
    fn from_iter<I: IntoIterator<Item = Grant>>(grants: I) -> Self {
        let mut cache = Self::new();
        for grant in grants {
            cache.insert(grant.user, grant.project, grant.permission);
        }
        cache
    }
}
