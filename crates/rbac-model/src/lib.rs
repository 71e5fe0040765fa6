//! Authorization model shared by the permission cache and its resolvers.
//!
//! # Crate Architecture
//!
//! ```text
//! rbac-model     (Action, Scope, Permission, WILDCARD_PROJECT)  ◄── THIS CRATE
//!     ↑
//! rbac-cache     (PermissionCache, SharedCache, Authorizer, config)
//! rbac-validate  (variable names, default datasources)
//!     ↑
//! rbac-cli       (rbac binary)
//! ```
//!
//! # Wildcards
//!
//! Each of the three request axes has a reserved wildcard:
//!
//! | Axis | Wildcard | Meaning when stored in a grant |
//! |------|----------|--------------------------------|
//! | project | [`WILDCARD_PROJECT`] (`"*"`) | every project, including ones created later |
//! | action | [`Action::Wildcard`] | every action |
//! | scope | [`Scope::Wildcard`] | every resource kind |
//!
//! Wildcards are ordinary enumeration members. A membership test treats
//! the wildcard as satisfying any request on its axis.

pub mod action;
pub mod error;
pub mod permission;
pub mod scope;

pub use action::Action;
pub use error::{assert_error_code, ErrorCode, ModelError};
pub use permission::{any_allows, Permission};
pub use scope::Scope;

/// Reserved project name meaning "every project".
pub const WILDCARD_PROJECT: &str = "*";

/// Returns `true` if `project` is the reserved wildcard project.
#[must_use]
pub fn is_wildcard_project(project: &str) -> bool {
    project == WILDCARD_PROJECT
}
