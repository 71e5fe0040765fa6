//! Resource kinds a permission applies to.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A resource kind.
///
/// Serializes to the PascalCase kind name (`"Dashboard"`,
/// `"GlobalDatasource"`, ...), with `"*"` for the wildcard.
///
/// # Example
///
/// ```
/// use rbac_model::Scope;
///
/// let scope: Scope = "globaldatasource".parse().unwrap();
/// assert_eq!(scope, Scope::GlobalDatasource);
/// assert!(scope.is_global());
/// assert!(Scope::Wildcard.covers(Scope::Secret));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    /// Matches every scope.
    #[serde(rename = "*")]
    Wildcard,
    Dashboard,
    Datasource,
    Folder,
    GlobalDatasource,
    GlobalRole,
    GlobalRoleBinding,
    GlobalSecret,
    GlobalUser,
    GlobalVariable,
    Project,
    Role,
    RoleBinding,
    Secret,
    Variable,
}

impl Scope {
    /// Every concrete (non-wildcard) scope.
    pub const CONCRETE: [Self; 14] = [
        Self::Dashboard,
        Self::Datasource,
        Self::Folder,
        Self::GlobalDatasource,
        Self::GlobalRole,
        Self::GlobalRoleBinding,
        Self::GlobalSecret,
        Self::GlobalUser,
        Self::GlobalVariable,
        Self::Project,
        Self::Role,
        Self::RoleBinding,
        Self::Secret,
        Self::Variable,
    ];

    /// Returns `true` for the wildcard member.
    #[must_use]
    pub fn is_wildcard(self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Returns `true` if a grant on `self` satisfies a request for `requested`.
    #[must_use]
    pub fn covers(self, requested: Self) -> bool {
        self.is_wildcard() || self == requested
    }

    /// Returns `true` for kinds that live outside any project.
    ///
    /// Callers conventionally request global kinds against the wildcard
    /// project. Matching does not enforce this: a grant stored under a
    /// concrete project still covers a global kind requested there.
    #[must_use]
    pub fn is_global(self) -> bool {
        matches!(
            self,
            Self::GlobalDatasource
                | Self::GlobalRole
                | Self::GlobalRoleBinding
                | Self::GlobalSecret
                | Self::GlobalUser
                | Self::GlobalVariable
        )
    }

    /// The wire form of this scope.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wildcard => "*",
            Self::Dashboard => "Dashboard",
            Self::Datasource => "Datasource",
            Self::Folder => "Folder",
            Self::GlobalDatasource => "GlobalDatasource",
            Self::GlobalRole => "GlobalRole",
            Self::GlobalRoleBinding => "GlobalRoleBinding",
            Self::GlobalSecret => "GlobalSecret",
            Self::GlobalUser => "GlobalUser",
            Self::GlobalVariable => "GlobalVariable",
            Self::Project => "Project",
            Self::Role => "Role",
            Self::RoleBinding => "RoleBinding",
            Self::Secret => "Secret",
            Self::Variable => "Variable",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ModelError;

    /// Parses a scope name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Self::Wildcard);
        }
        Self::CONCRETE
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::UnknownScope(s.to_string()))
    }
}
