// Inspired by `serde_yaml::Value`

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple};
use serde::{Deserialize, Serialize};
use serde_yaml::Number;

use super::{Record, Sequence};

/// Represents a single field value of a list model record.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(from = "serde_yaml::Value", into = "serde_yaml::Value")]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a string value.
    String(String),
    /// Represents a numerical value.
    Number(Number),
    /// Represents a nested record.
    Mapping(Record),
    /// Represents a sequence of values.
    Sequence(Sequence),
}

impl Eq for Value {}

impl std::fmt::Display for Value {
    /// Pretty prints the `Value`
    ///
    /// # Example
    ///
    /// ```
    /// use list_reconciler::types::{Record, Value};
    /// use std::str::FromStr;
    ///
    /// let r = Record::from_str("{itemType: input, itemIndex: 3, tags: [a, ~]}").unwrap();
    /// assert_eq!(
    ///     Value::from(r).to_string(),
    ///     r#"{"itemType": "input", "itemIndex": 3, "tags": ["a", Null]}"#
    /// );
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Sequence(seq) => {
                write!(f, "[")?;
                for (i, v) in seq.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Self::Mapping(r) => write!(f, "{r}"),
        }
    }
}

impl Value {
    /// Checks if the `Value` is a boolean.
    #[inline]
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// If the `Value` is a Boolean, return the associated bool. Returns None otherwise.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the `Value` is an integer, represent it as i64 if possible. Returns None otherwise.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the `Value` is a String, return the associated `str`. Returns None otherwise.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a Mapping, return a reference to it. Returns None otherwise.
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Record> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// If the value is a Sequence, return a reference to it. Returns None otherwise.
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Provides a nice string for each enum variant for debugging and pretty-printing.
    pub(crate) fn variant(&self) -> &str {
        match self {
            Self::Bool(_) => "Value::Bool",
            Self::Mapping(_) => "Value::Mapping",
            Self::Null => "Value::Null",
            Self::Number(_) => "Value::Number",
            Self::Sequence(_) => "Value::Sequence",
            Self::String(_) => "Value::String",
        }
    }

    /// Converts the `Value` into a Python object.
    pub fn as_py_obj(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let obj = match self {
            Value::Null => py.None(),
            Value::Bool(b) => PyBool::new(py, *b).to_owned().into_any().unbind(),
            Value::String(s) => PyString::new(py, s).into_any().unbind(),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.into_pyobject(py)?.into_any().unbind()
                } else if let Some(u) = n.as_u64() {
                    u.into_pyobject(py)?.into_any().unbind()
                } else if let Some(f) = n.as_f64() {
                    PyFloat::new(py, f).into_any().unbind()
                } else {
                    py.None()
                }
            }
            Value::Sequence(s) => {
                let mut pyseq = Vec::with_capacity(s.len());
                for v in s {
                    pyseq.push(v.as_py_obj(py)?);
                }
                PyList::new(py, pyseq)?.into_any().unbind()
            }
            Value::Mapping(r) => r.as_py_dict(py)?.into_any().unbind(),
        };
        Ok(obj)
    }

    /// Converts a Python object into a `Value`.
    ///
    /// Supports `None`, `bool`, `int`, `float`, `str`, `list`, `tuple` and `dict`. Returns a
    /// `ValueError` for any other type.
    pub fn from_py_obj(obj: &Bound<'_, PyAny>) -> PyResult<Self> {
        // NOTE: `bool` must be checked before `int`, since Python bools are ints.
        if obj.is_none() {
            Ok(Self::Null)
        } else if obj.is_instance_of::<PyBool>() {
            Ok(Self::Bool(obj.extract::<bool>()?))
        } else if obj.is_instance_of::<PyInt>() {
            if let Ok(i) = obj.extract::<i64>() {
                Ok(Self::from(i))
            } else {
                Ok(Self::from(obj.extract::<u64>()?))
            }
        } else if obj.is_instance_of::<PyFloat>() {
            Ok(Self::from(obj.extract::<f64>()?))
        } else if obj.is_instance_of::<PyString>() {
            Ok(Self::String(obj.extract::<String>()?))
        } else if let Ok(d) = obj.cast::<PyDict>() {
            Ok(Self::Mapping(Record::from_py_dict(d)?))
        } else if let Ok(l) = obj.cast::<PyList>() {
            l.iter()
                .map(|v| Self::from_py_obj(&v))
                .collect::<PyResult<Sequence>>()
                .map(Self::Sequence)
        } else if let Ok(t) = obj.cast::<PyTuple>() {
            t.iter()
                .map(|v| Self::from_py_obj(&v))
                .collect::<PyResult<Sequence>>()
                .map(Self::Sequence)
        } else {
            Err(PyValueError::new_err(format!(
                "Can't convert Python object of type {} into a record value",
                obj.get_type()
            )))
        }
    }
}
