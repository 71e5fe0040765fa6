//! Dashboard validation pass.

use crate::datasource::{validate_dashboard_datasources, DatasourceSpec};
use crate::variable::validate_variable_names;
use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Dashboard document envelope (`{"kind", "metadata", "spec"}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub metadata: Metadata,
    pub spec: DashboardSpec,
}

impl Dashboard {
    /// Parses a dashboard document. Unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Json`] if the input is not a dashboard document.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// The dashboard fields validation reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSpec {
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub datasources: BTreeMap<String, DatasourceSpec>,
}

/// A dashboard variable (`ListVariable`, `TextVariable`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub kind: String,
    pub spec: VariableSpec,
}

impl Variable {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.spec.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
}

/// Validates variable names, then embedded datasources.
///
/// # Errors
///
/// The first [`ValidationError`] found.
pub fn validate_dashboard(spec: &DashboardSpec) -> Result<(), ValidationError> {
    validate_variable_names(spec.variables.iter().map(Variable::name))?;
    validate_dashboard_datasources(&spec.datasources)?;
    debug!(
        variables = spec.variables.len(),
        datasources = spec.datasources.len(),
        "dashboard validated"
    );
    Ok(())
}
