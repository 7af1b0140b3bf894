// This implementation is inspired by `serde_yaml::Mapping`

use anyhow::{Result, anyhow};
use indexmap::IndexMap;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::value::Value;
use crate::config::Config;

/// Represents a single element of a list model: an insertion-ordered bag of named fields.
///
/// Fields keep the position of their first insertion. Overwriting a field through
/// [`Record::insert()`] replaces its value in place.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{k}\": {v}")?;
        }
        write!(f, "}}")
    }
}

impl Record {
    /// Creates a new empty record.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new record with the given initial capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts field `k` with value `v`, returning the previous value of the field if it was
    /// present.
    #[inline]
    pub fn insert(&mut self, k: &str, v: Value) -> Option<Value> {
        if let Some(old) = self.fields.get_mut(k) {
            return Some(std::mem::replace(old, v));
        }
        self.fields.insert(k.to_string(), v);
        None
    }

    /// Removes field `k` and returns its value. Preserves the order of the remaining fields.
    #[inline]
    pub fn remove(&mut self, k: &str) -> Option<Value> {
        self.fields.shift_remove(k)
    }

    /// Returns a reference to the value of field `k` if the field is present.
    #[inline]
    #[must_use]
    pub fn get(&self, k: &str) -> Option<&Value> {
        self.fields.get(k)
    }

    /// Returns a mutable reference to the value of field `k` if the field is present.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, k: &str) -> Option<&mut Value> {
        self.fields.get_mut(k)
    }

    /// Returns `true` if the record contains field `k`.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, k: &str) -> bool {
        self.fields.contains_key(k)
    }

    /// Returns the number of fields in the record.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Checks if the record has no fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator visiting all fields in insertion order.
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Merges the fields of `other` into `self`. Fields which exist in both records take the
    /// value from `other`.
    pub fn merge(&mut self, other: Self) {
        for (k, v) in other {
            self.insert(&k, v);
        }
    }

    /// Returns the record's category, if the configured type field holds a string.
    #[inline]
    #[must_use]
    pub fn item_type(&self, config: &Config) -> Option<&str> {
        self.get(&config.type_field).and_then(Value::as_str)
    }

    /// Returns the record's index within its category, if the configured index field holds an
    /// integer.
    #[inline]
    #[must_use]
    pub fn item_index(&self, config: &Config) -> Option<i64> {
        self.get(&config.index_field).and_then(Value::as_i64)
    }

    /// Checks if the configured last-marker field is set to `true`.
    #[inline]
    #[must_use]
    pub fn is_last(&self, config: &Config) -> bool {
        self.get(&config.last_field)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Converts the `Record` into a `PyDict`.
    pub fn as_py_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        for (k, v) in self {
            dict.set_item(k, v.as_py_obj(py)?)?;
        }
        Ok(dict)
    }

    /// Converts a `PyDict` into a `Record`. Non-string keys are converted with Python's `str()`.
    pub fn from_py_dict(dict: &Bound<'_, PyDict>) -> PyResult<Self> {
        let mut r = Self::with_capacity(dict.len());
        for (k, v) in dict.iter() {
            let k = match k.extract::<String>() {
                Ok(s) => s,
                Err(_) => k.str()?.to_string(),
            };
            r.insert(&k, Value::from_py_obj(&v)?);
        }
        Ok(r)
    }
}

impl FromStr for Record {
    type Err = anyhow::Error;

    /// Parses a YAML mapping into a `Record`.
    fn from_str(s: &str) -> Result<Self> {
        let v: serde_yaml::Value = serde_yaml::from_str(s)?;
        match Value::from(v) {
            Value::Mapping(r) => Ok(r),
            other => Err(anyhow!(
                "Expected a YAML mapping for a record, got {}",
                other.variant()
            )),
        }
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Record {
    fn from(fields: [(&str, Value); N]) -> Self {
        let mut r = Self::with_capacity(N);
        for (k, v) in fields {
            r.insert(k, v);
        }
        r
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut r = Self::new();
        for (k, v) in iter {
            r.insert(&k, v);
        }
        r
    }
}
