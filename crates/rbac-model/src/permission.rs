//! A single granted capability: actions × scopes.
//!
//! # Matching
//!
//! ```text
//! allows(action, scope) =
//!     (actions ∋ action ∨ actions ∋ *)  ∧  (scopes ∋ scope ∨ scopes ∋ *)
//! ```
//!
//! Permissions are purely additive. There is no deny entry; a request is
//! denied only when no permission allows it.

use crate::{Action, ModelError, Scope};
use serde::{Deserialize, Serialize};

/// A granted set of actions over a set of scopes.
///
/// Both lists are non-empty and fixed at creation. The only ways to build
/// one are [`Permission::new`] and deserialization, and both reject empty
/// lists, so an empty permission never reaches the cache.
///
/// # Example
///
/// ```
/// use rbac_model::{Action, Permission, Scope};
///
/// let perm = Permission::new([Action::Create], [Scope::Dashboard, Scope::Variable]).unwrap();
/// assert!(perm.allows(Action::Create, Scope::Variable));
/// assert!(!perm.allows(Action::Delete, Scope::Variable));
/// assert!(!perm.allows(Action::Create, Scope::Datasource));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPermission")]
pub struct Permission {
    actions: Vec<Action>,
    scopes: Vec<Scope>,
}

/// Unvalidated wire form of [`Permission`].
#[derive(Deserialize)]
struct RawPermission {
    actions: Vec<Action>,
    scopes: Vec<Scope>,
}

impl TryFrom<RawPermission> for Permission {
    type Error = ModelError;

    fn try_from(raw: RawPermission) -> Result<Self, Self::Error> {
        Self::new(raw.actions, raw.scopes)
    }
}

impl Permission {
    /// Creates a permission.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyActions`] or [`ModelError::EmptyScopes`]
    /// if either list is empty.
    pub fn new(
        actions: impl IntoIterator<Item = Action>,
        scopes: impl IntoIterator<Item = Scope>,
    ) -> Result<Self, ModelError> {
        let actions: Vec<Action> = actions.into_iter().collect();
        let scopes: Vec<Scope> = scopes.into_iter().collect();
        if actions.is_empty() {
            return Err(ModelError::EmptyActions);
        }
        if scopes.is_empty() {
            return Err(ModelError::EmptyScopes);
        }
        Ok(Self { actions, scopes })
    }

    /// Every action on every scope.
    #[must_use]
    pub fn admin() -> Self {
        Self {
            actions: vec![Action::Wildcard],
            scopes: vec![Scope::Wildcard],
        }
    }

    /// The granted actions, in creation order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The covered scopes, in creation order.
    #[must_use]
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Returns `true` if this permission grants `action` on `scope`.
    #[must_use]
    pub fn allows(&self, action: Action, scope: Scope) -> bool {
        self.actions.iter().any(|granted| granted.covers(action))
            && self.scopes.iter().any(|granted| granted.covers(scope))
    }
}

/// Returns `true` if any permission in the list grants `action` on `scope`.
///
/// Stops at the first match.
#[must_use]
pub fn any_allows<'a>(
    permissions: impl IntoIterator<Item = &'a Permission>,
    action: Action,
    scope: Scope,
) -> bool {
    permissions
        .into_iter()
        .any(|permission| permission.allows(action, scope))
}
