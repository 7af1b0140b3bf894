#![deny(clippy::suspicious)]
#![warn(clippy::pedantic)]
#![warn(let_underscore_drop)]
// Allows need to be after warn/deny
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

mod config;
mod error;
mod model;
mod reconcile;
pub mod types;

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

pub use config::Config;
pub use error::ReconcileError;
pub use model::{ListModel, ModelChange, SubscriptionId, VecModel};
pub use reconcile::{Reconciled, Reconciler};
use types::{Record, Value};

/// Moves or inserts the record identified by (`item_type`, `item_index`) to `start_index`, using
/// the default field names.
///
/// See [`Reconciler::find_or_insert()`] for the full semantics.
pub fn find_or_insert<M: ListModel + ?Sized>(
    item_type: &str,
    item_index: i64,
    start_index: usize,
    model: &mut M,
    extra: Record,
) -> Result<Reconciled, ReconcileError> {
    Reconciler::default().find_or_insert(item_type, item_index, start_index, model, extra)
}

/// Truncates `model` at `from_index` and marks the final remaining record, using the default
/// field names.
pub fn truncate_and_mark_last<M: ListModel + ?Sized>(
    model: &mut M,
    from_index: usize,
) -> Result<(), ReconcileError> {
    Reconciler::default().truncate_and_mark_last(model, from_index)
}

/// Marks the final record of `model` as the last one, using the default field names.
pub fn mark_last<M: ListModel + ?Sized>(model: &mut M) -> Result<(), ReconcileError> {
    Reconciler::default().mark_last(model)
}

impl From<ReconcileError> for PyErr {
    fn from(e: ReconcileError) -> Self {
        if e.is_out_of_range() {
            PyIndexError::new_err(e.to_string())
        } else {
            PyValueError::new_err(e.to_string())
        }
    }
}

/// Python-facing list model which owns its records and reconciles them in place.
#[pyclass(name = "ListModel", unsendable)]
#[derive(Debug, Default)]
pub struct PyListModel {
    model: VecModel,
    reconciler: Reconciler,
}

impl PyListModel {
    #[must_use]
    pub fn new(records: Vec<Record>, config: Config) -> Self {
        Self {
            model: VecModel::from(records),
            reconciler: Reconciler::new(config),
        }
    }

    #[must_use]
    pub fn model(&self) -> &VecModel {
        &self.model
    }

    /// Converts a position passed in from Python. Negative positions are out of range.
    fn pos(&self, operation: &'static str, pos: i64) -> Result<usize, ReconcileError> {
        ReconcileError::check_position(operation, pos, self.model.count())
    }
}

#[pymethods]
impl PyListModel {
    #[new]
    #[pyo3(signature = (records=None, config=None))]
    pub fn new_py(
        records: Option<Vec<Bound<'_, PyDict>>>,
        config: Option<PyRef<'_, Config>>,
    ) -> PyResult<Self> {
        let records = records
            .unwrap_or_default()
            .iter()
            .map(Record::from_py_dict)
            .collect::<PyResult<Vec<_>>>()?;
        let config = config.map(|c| c.clone()).unwrap_or_default();
        Ok(Self::new(records, config))
    }

    fn __repr__(&self) -> String {
        format!("{self:#?}")
    }

    fn __len__(&self) -> usize {
        self.model.count()
    }

    /// Returns the number of records in the model.
    #[getter]
    #[must_use]
    pub fn count(&self) -> usize {
        self.model.count()
    }

    /// Returns the reconciler config of this model.
    #[getter]
    #[must_use]
    pub fn config(&self) -> Config {
        self.reconciler.config().clone()
    }

    /// Returns a copy of the record at `pos` as a dict.
    pub fn get<'py>(&self, py: Python<'py>, pos: i64) -> PyResult<Bound<'py, PyDict>> {
        let pos = self.pos("get", pos)?;
        let r = self
            .model
            .get(pos)
            .ok_or_else(|| ReconcileError::out_of_range("get", pos, self.model.count()))?;
        r.as_py_dict(py)
    }

    /// Returns copies of all records as a list of dicts.
    pub fn records<'py>(&self, py: Python<'py>) -> PyResult<Vec<Bound<'py, PyDict>>> {
        self.model
            .records()
            .iter()
            .map(|r| r.as_py_dict(py))
            .collect()
    }

    pub fn insert(&mut self, pos: i64, record: &Bound<'_, PyDict>) -> PyResult<()> {
        let pos = self.pos("insert", pos)?;
        let r = Record::from_py_dict(record)?;
        Ok(self.model.insert(pos, r)?)
    }

    /// Removes the record at `pos` and returns it as a dict.
    pub fn remove<'py>(&mut self, py: Python<'py>, pos: i64) -> PyResult<Bound<'py, PyDict>> {
        let pos = self.pos("remove", pos)?;
        let r = self.model.remove(pos)?;
        r.as_py_dict(py)
    }

    #[pyo3(name = "move", signature = (from, to, count=1))]
    pub fn move_py(&mut self, from: i64, to: i64, count: i64) -> PyResult<()> {
        let from = self.pos("move", from)?;
        let to = self.pos("move", to)?;
        let count = self.pos("move", count)?;
        Ok(self.model.move_range(from, to, count)?)
    }

    pub fn set_field(&mut self, pos: i64, field: &str, value: &Bound<'_, PyAny>) -> PyResult<()> {
        let pos = self.pos("set_field", pos)?;
        let v = Value::from_py_obj(value)?;
        Ok(self.model.set_field(pos, field, v)?)
    }

    /// Moves or inserts the record identified by (`item_type`, `item_index`) to `start_index`.
    ///
    /// Returns one of "in_place", "moved" or "inserted".
    #[pyo3(signature = (item_type, item_index, start_index, extra=None))]
    pub fn find_or_insert(
        &mut self,
        item_type: &str,
        item_index: i64,
        start_index: i64,
        extra: Option<&Bound<'_, PyDict>>,
    ) -> PyResult<&'static str> {
        let start_index = self.pos("find_or_insert", start_index)?;
        let extra = match extra {
            Some(d) => Record::from_py_dict(d)?,
            None => Record::new(),
        };
        let res = self.reconciler.find_or_insert(
            item_type,
            item_index,
            start_index,
            &mut self.model,
            extra,
        )?;
        Ok(res.as_str())
    }

    /// Removes all records from `from_index` onwards and marks the final remaining record.
    pub fn truncate_and_mark_last(&mut self, from_index: i64) -> PyResult<()> {
        let from_index = self.pos("truncate_and_mark_last", from_index)?;
        Ok(self
            .reconciler
            .truncate_and_mark_last(&mut self.model, from_index)?)
    }

    /// Marks the final record of the model.
    pub fn mark_last(&mut self) -> PyResult<()> {
        Ok(self.reconciler.mark_last(&mut self.model)?)
    }
}

#[pymodule]
fn list_reconciler(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Register the `ListModel` Python class which wraps the reconciler
    m.add_class::<PyListModel>()?;
    // Register the `Config` class
    m.add_class::<Config>()?;
    Ok(())
}
