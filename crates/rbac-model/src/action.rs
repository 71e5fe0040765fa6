//! Actions a permission can grant.
//!
//! The enumeration is closed and shared verbatim with whatever resolver
//! flattens roles into permissions. [`Action::Wildcard`] is an ordinary
//! member whose meaning is "every action".
//!
//! # Example
//!
//! ```
//! use rbac_model::Action;
//!
//! let action: Action = "update".parse().unwrap();
//! assert_eq!(action, Action::Update);
//! assert!(Action::Wildcard.covers(Action::Delete));
//! assert!(!Action::Read.covers(Action::Update));
//! ```

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An action on a resource.
///
/// Serializes to the lowercase wire form (`"create"`, `"read"`, ...),
/// with `"*"` for the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Matches every action.
    #[serde(rename = "*")]
    Wildcard,
    #[serde(rename = "create")]
    Create,
    #[serde(rename = "read")]
    Read,
    #[serde(rename = "update")]
    Update,
    #[serde(rename = "delete")]
    Delete,
}

impl Action {
    /// Every concrete (non-wildcard) action.
    pub const CONCRETE: [Self; 4] = [Self::Create, Self::Read, Self::Update, Self::Delete];

    /// Returns `true` for the wildcard member.
    #[must_use]
    pub fn is_wildcard(self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Returns `true` if a grant of `self` satisfies a request for `requested`.
    #[must_use]
    pub fn covers(self, requested: Self) -> bool {
        self.is_wildcard() || self == requested
    }

    /// The wire form of this action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wildcard => "*",
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ModelError;

    /// Parses an action name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "*" => Ok(Self::Wildcard),
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(ModelError::UnknownAction(s.to_string())),
        }
    }
}
