//! In-memory permission cache for role-based access control.
//!
//! Role bindings are expanded ahead of time into a per-user map of
//! project → permissions. Request-time checks are then two hash lookups
//! and a short scan; no role or binding is consulted on the hot path.
//!
//! # Crate Architecture
//!
//! ```text
//! PermissionResolver (StaticResolver, FileResolver, ...)
//!         │ resolve() → Vec<Grant>
//!         ▼
//! PermissionCache::from_grants          one immutable generation
//!         │
//!         ▼
//! SharedCache::publish / refresh        atomic swap, readers never block
//!         │ snapshot()
//!         ▼
//! Authorizer: PermissionPolicy          guest permissions + audit log
//! ```
//!
//! # Evaluation Rules
//!
//! For a request `(user, action, project, scope)`:
//!
//! 1. Unknown user → deny.
//! 2. Permissions stored under the wildcard project are checked first,
//!    then those stored under `project` itself.
//! 3. A permission matches if its actions cover `action` and its scopes
//!    cover `scope` (the wildcard covers everything on its axis).
//! 4. No match → deny.
//!
//! # Example
//!
//! ```
//! use rbac_cache::PermissionCache;
//! use rbac_model::{Action, Permission, Scope};
//!
//! let mut cache = PermissionCache::new();
//! cache.insert(
//!     "alice",
//!     "payments",
//!     Permission::new([Action::Read], [Scope::Dashboard]).unwrap(),
//! );
//!
//! assert!(cache.has_permission("alice", Action::Read, "payments", Scope::Dashboard));
//! assert!(!cache.has_permission("alice", Action::Read, "billing", Scope::Dashboard));
//! ```

pub mod config;

mod authorizer;
mod cache;
mod error;
mod grant;
mod policy;
mod resolver;
mod shared;

pub use authorizer::Authorizer;
pub use cache::{PermissionCache, ProjectPermissions};
pub use error::{CacheError, ResolveError};
pub use grant::Grant;
pub use policy::PermissionPolicy;
pub use resolver::{FileResolver, PermissionResolver, StaticResolver};
pub use shared::{RefreshStats, SharedCache};
