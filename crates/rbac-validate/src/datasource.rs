//! Default-datasource uniqueness.
//!
//! At most one datasource per plugin kind may be flagged default within a
//! scope (a project's datasource list, or the datasources embedded in one
//! dashboard).

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Plugin reference. Only `kind` takes part in validation; `spec` is
/// carried opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub kind: String,
    #[serde(default)]
    pub spec: serde_json::Value,
}

/// The datasource fields validation reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasourceSpec {
    #[serde(default)]
    pub default: bool,
    pub plugin: Plugin,
}

impl DatasourceSpec {
    #[must_use]
    pub fn new(kind: impl Into<String>, default: bool) -> Self {
        Self {
            default,
            plugin: Plugin {
                kind: kind.into(),
                spec: serde_json::Value::Null,
            },
        }
    }

    /// Plugin kind, e.g. `PrometheusDatasource`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.plugin.kind
    }
}

/// A named, stored datasource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datasource {
    pub name: String,
    pub spec: DatasourceSpec,
}

impl Datasource {
    #[must_use]
    pub fn new(name: impl Into<String>, spec: DatasourceSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }
}

/// Checks that `name` may be stored with `spec` next to `existing`.
///
/// A non-default datasource always passes. An entry in `existing` with the
/// same name is the datasource being updated and is skipped.
///
/// # Errors
///
/// [`ValidationError::DefaultDatasourceTaken`] naming the first conflicting
/// datasource.
pub fn validate_default_datasource(
    name: &str,
    spec: &DatasourceSpec,
    existing: &[Datasource],
) -> Result<(), ValidationError> {
    if !spec.default {
        return Ok(());
    }

    let conflict = existing
        .iter()
        .filter(|other| other.name != name)
        .find(|other| other.spec.default && other.spec.kind() == spec.kind());

    match conflict {
        Some(other) => Err(ValidationError::DefaultDatasourceTaken {
            name: name.to_string(),
            kind: spec.kind().to_string(),
            existing: other.name.clone(),
        }),
        None => Ok(()),
    }
}

/// Checks the datasources embedded in one dashboard.
///
/// Entries are visited in name order, so the reported datasource is the
/// second default of its kind alphabetically.
///
/// # Errors
///
/// [`ValidationError::DuplicateDashboardDefault`] on the second default
/// for a plugin kind.
pub fn validate_dashboard_datasources(
    datasources: &BTreeMap<String, DatasourceSpec>,
) -> Result<(), ValidationError> {
    let mut default_for: BTreeMap<&str, &str> = BTreeMap::new();

    for (name, spec) in datasources.iter().filter(|(_, spec)| spec.default) {
        if let Some(first) = default_for.insert(spec.kind(), name) {
            debug!(kind = spec.kind(), first, second = %name, "duplicate default datasource");
            return Err(ValidationError::DuplicateDashboardDefault {
                name: name.clone(),
                kind: spec.kind().to_string(),
            });
        }
    }
    Ok(())
}
