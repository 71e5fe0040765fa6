//! Field validation for dashboards, datasources and variables.
//!
//! These checks run before a resource is stored. They cover naming and
//! uniqueness rules only; plugin payloads are carried opaquely and are not
//! validated here.
//!
//! # Example
//!
//! ```
//! use rbac_validate::{validate_dashboard, Dashboard};
//!
//! let dashboard = Dashboard::from_json(r#"{
//!     "metadata": {"name": "demo"},
//!     "spec": {"variables": [{"kind": "TextVariable", "spec": {"name": "123"}}]}
//! }"#).unwrap();
//!
//! assert!(validate_dashboard(&dashboard.spec).is_err());
//! ```

mod dashboard;
mod datasource;
mod error;
mod variable;

pub use dashboard::{validate_dashboard, Dashboard, DashboardSpec, Metadata, Variable, VariableSpec};
pub use datasource::{
    validate_dashboard_datasources, validate_default_datasource, Datasource, DatasourceSpec,
    Plugin,
};
pub use error::ValidationError;
pub use variable::{
    is_builtin_variable, validate_variable_name, validate_variable_names,
    BUILTIN_VARIABLE_PREFIX,
};
