//! Sources of the flattened grant set.
//!
//! # Architecture
//!
//! ```text
//! PermissionResolver trait      ← this module
//!          │
//!          ├── StaticResolver   ← grants held in memory (tests, embedding)
//!          ├── FileResolver     ← grants read from a TOML file
//!          └── (yours)          ← role/role-binding store, flattened
//! ```
//!
//! The cache knows nothing about roles, bindings or inheritance between
//! them. A resolver hands over the complete, already-flattened set of
//! `(user, project, permission)` triples each time it is asked.
//!
//! # Grants File
//!
//! ```toml
//! [[grants]]
//! user = "admin"
//! project = "*"
//! actions = ["*"]
//! scopes = ["*"]
//!
//! [[grants]]
//! user = "alice"
//! project = "payments"
//! actions = ["read", "update"]
//! scopes = ["Dashboard", "Variable"]
//! ```

use crate::{Grant, ResolveError};
use rbac_model::{Action, Permission, Scope};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Produces the complete grant set for one cache generation.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a refresh can run on any
/// thread.
pub trait PermissionResolver: Send + Sync {
    /// Returns every grant currently in force.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the backing source is unavailable or
    /// yields an invalid grant. The caller keeps its current generation.
    fn resolve(&self) -> Result<Vec<Grant>, ResolveError>;
}

/// Resolver over a fixed, in-memory grant list.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    grants: Vec<Grant>,
}

impl StaticResolver {
    #[must_use]
    pub fn new(grants: Vec<Grant>) -> Self {
        Self { grants }
    }
}

impl PermissionResolver for StaticResolver {
    fn resolve(&self) -> Result<Vec<Grant>, ResolveError> {
        Ok(self.grants.clone())
    }
}

/// Resolver reading a TOML grants file on every call.
#[derive(Debug, Clone)]
pub struct FileResolver {
    path: PathBuf,
}

/// Top-level layout of a grants file.
#[derive(Debug, Deserialize)]
struct GrantsFile {
    #[serde(default)]
    grants: Vec<GrantEntry>,
}

/// One `[[grants]]` table before validation.
#[derive(Debug, Deserialize)]
struct GrantEntry {
    user: String,
    project: String,
    actions: Vec<Action>,
    scopes: Vec<Scope>,
}

impl FileResolver {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses grants from TOML text. `path` is only used in errors.
    fn parse(path: &Path, content: &str) -> Result<Vec<Grant>, ResolveError> {
        let file: GrantsFile =
            toml::from_str(content).map_err(|e| ResolveError::parse_toml(path, e))?;

        file.grants
            .into_iter()
            .map(|entry| -> Result<Grant, ResolveError> {
                let permission = Permission::new(entry.actions, entry.scopes).map_err(|source| {
                    ResolveError::InvalidGrant {
                        user: entry.user.clone(),
                        source,
                    }
                })?;
                Ok(Grant::new(entry.user, entry.project, permission))
            })
            .collect()
    }
}

impl PermissionResolver for FileResolver {
    fn resolve(&self) -> Result<Vec<Grant>, ResolveError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| ResolveError::read_file(&self.path, e))?;
        let grants = Self::parse(&self.path, &content)?;
        debug!(path = %self.path.display(), count = grants.len(), "Loaded grants file");
        Ok(grants)
    }
}
