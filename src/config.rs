use anyhow::{Context, Result};
use pyo3::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Names of the record fields the reconciler reads and writes.
#[pyclass]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Field holding the record's category
    #[pyo3(get)]
    pub type_field: String,
    /// Field holding the record's integer index within its category
    #[pyo3(get)]
    pub index_field: String,
    /// Field which is set to `true` on the final record of the model
    #[pyo3(get)]
    pub last_field: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            type_field: "itemType".into(),
            index_field: "itemIndex".into(),
            last_field: "last".into(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new(type_field: &str, index_field: &str, last_field: &str) -> Self {
        Self {
            type_field: type_field.into(),
            index_field: index_field.into(),
            last_field: last_field.into(),
        }
    }

    /// Parses a config from a YAML document. Keys missing from the document keep their default
    /// value.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let c: Self = serde_yaml::from_str(yaml)?;
        Ok(c)
    }

    /// Loads the config from the YAML file at `path`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let c = Self::from_yaml_str(&yaml)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), config = ?c, "Loaded reconciler config");
        Ok(c)
    }
}

#[pymethods]
impl Config {
    #[new]
    #[pyo3(signature = (type_field=None, index_field=None, last_field=None))]
    fn new_py(
        type_field: Option<&str>,
        index_field: Option<&str>,
        last_field: Option<&str>,
    ) -> Self {
        let d = Self::default();
        Self {
            type_field: type_field.map_or(d.type_field, String::from),
            index_field: index_field.map_or(d.index_field, String::from),
            last_field: last_field.map_or(d.last_field, String::from),
        }
    }

    fn __repr__(&self) -> String {
        format!("{self:#?}")
    }
}
