use anyhow::{Result, anyhow};

use super::{ListModel, move_block};
use crate::error::ReconcileError;
use crate::types::{Record, Value};

/// Describes a single successful mutation of a [`VecModel`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ModelChange {
    /// A record was inserted at `pos`.
    Inserted { pos: usize },
    /// The record at `pos` was removed.
    Removed { pos: usize },
    /// `len` records were moved from `from` so that the first of them is now at `to`.
    Moved { from: usize, to: usize, len: usize },
    /// Field `field` of the record at `pos` changed its value.
    FieldChanged { pos: usize, field: String },
}

/// Handle returned by [`VecModel::subscribe()`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ModelChange)>;

/// A vector of records which notifies registered observers about every change.
///
/// Observers are called synchronously after the mutation has been applied, in the order in which
/// they were registered. Failed operations don't notify observers. `set_field` only notifies
/// observers if the new value differs from the current one.
#[derive(Default)]
pub struct VecModel {
    records: Vec<Record>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl std::fmt::Debug for VecModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VecModel")
            .field("records", &self.records)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<Record>> for VecModel {
    fn from(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }
}

impl From<VecModel> for Vec<Record> {
    fn from(m: VecModel) -> Self {
        m.records
    }
}

impl VecModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML sequence of mappings into a model.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let v: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        match Value::from(v) {
            Value::Sequence(s) => {
                let mut records = Vec::with_capacity(s.len());
                for (i, v) in s.into_iter().enumerate() {
                    match v {
                        Value::Mapping(r) => records.push(r),
                        other => {
                            return Err(anyhow!(
                                "Expected a mapping for record {i}, got {}",
                                other.variant()
                            ));
                        }
                    }
                }
                Ok(Self::from(records))
            }
            Value::Null => Ok(Self::new()),
            other => Err(anyhow!(
                "Expected a YAML sequence of records, got {}",
                other.variant()
            )),
        }
    }

    /// Returns the records in model order.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[inline]
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Registers `observer` to be called after every change of the model.
    pub fn subscribe(&mut self, observer: impl FnMut(&ModelChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a previously registered observer. Returns false if `id` isn't registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    fn notify(&mut self, change: &ModelChange) {
        tracing::trace!(?change, observers = self.observers.len(), "model changed");
        for (_, observer) in &mut self.observers {
            observer(change);
        }
    }
}

impl ListModel for VecModel {
    #[inline]
    fn count(&self) -> usize {
        self.records.len()
    }

    #[inline]
    fn get(&self, pos: usize) -> Option<&Record> {
        self.records.get(pos)
    }

    fn insert(&mut self, pos: usize, record: Record) -> Result<(), ReconcileError> {
        ListModel::insert(&mut self.records, pos, record)?;
        self.notify(&ModelChange::Inserted { pos });
        Ok(())
    }

    fn remove(&mut self, pos: usize) -> Result<Record, ReconcileError> {
        let r = ListModel::remove(&mut self.records, pos)?;
        self.notify(&ModelChange::Removed { pos });
        Ok(r)
    }

    fn move_range(&mut self, from: usize, to: usize, len: usize) -> Result<(), ReconcileError> {
        move_block(&mut self.records, from, to, len)?;
        if len > 0 && from != to {
            self.notify(&ModelChange::Moved { from, to, len });
        }
        Ok(())
    }

    fn set_field(&mut self, pos: usize, field: &str, value: Value) -> Result<(), ReconcileError> {
        let count = self.records.len();
        let r = self
            .records
            .get_mut(pos)
            .ok_or_else(|| ReconcileError::out_of_range("set_field", pos, count))?;
        if r.get(field) == Some(&value) {
            return Ok(());
        }
        r.insert(field, value);
        self.notify(&ModelChange::FieldChanged {
            pos,
            field: field.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod vec_model_tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::str::FromStr;

    fn record(yaml: &str) -> Record {
        Record::from_str(yaml).unwrap()
    }

    fn recording(m: &mut VecModel) -> Rc<RefCell<Vec<ModelChange>>> {
        let log = Rc::new(RefCell::new(vec![]));
        let l = Rc::clone(&log);
        m.subscribe(move |c| l.borrow_mut().push(c.clone()));
        log
    }

    #[test]
    fn test_notifies_changes() {
        let mut m = VecModel::new();
        let log = recording(&mut m);

        m.insert(0, record("{a: 1}")).unwrap();
        m.insert(1, record("{a: 2}")).unwrap();
        m.move_range(1, 0, 1).unwrap();
        m.set_field(0, "last", false.into()).unwrap();
        m.remove(1).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                ModelChange::Inserted { pos: 0 },
                ModelChange::Inserted { pos: 1 },
                ModelChange::Moved {
                    from: 1,
                    to: 0,
                    len: 1
                },
                ModelChange::FieldChanged {
                    pos: 0,
                    field: "last".into()
                },
                ModelChange::Removed { pos: 1 },
            ]
        );
        assert_eq!(m.records(), &[record("{a: 2, last: false}")]);
    }

    #[test]
    fn test_failed_operations_dont_notify() {
        let mut m = VecModel::from(vec![record("{a: 1}")]);
        let log = recording(&mut m);

        assert!(m.insert(2, Record::new()).is_err());
        assert!(m.remove(1).is_err());
        assert!(m.move_range(0, 1, 1).is_err());
        assert!(m.set_field(3, "x", Value::Null).is_err());

        assert!(log.borrow().is_empty());
        assert_eq!(m.count(), 1);
    }

    #[test]
    fn test_unchanged_field_doesnt_notify() {
        let mut m = VecModel::from(vec![record("{a: 1, last: true}")]);
        let log = recording(&mut m);
        m.set_field(0, "last", true.into()).unwrap();
        m.move_range(0, 0, 1).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe() {
        let mut m = VecModel::new();
        let calls = Rc::new(RefCell::new(0));
        let c = Rc::clone(&calls);
        let id = m.subscribe(move |_| *c.borrow_mut() += 1);

        m.insert(0, Record::new()).unwrap();
        assert!(m.unsubscribe(id));
        assert!(!m.unsubscribe(id));
        m.insert(0, Record::new()).unwrap();

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_from_yaml_str() {
        let m = VecModel::from_yaml_str("[{itemType: A, itemIndex: 1}, {itemType: B}]").unwrap();
        assert_eq!(m.count(), 2);
        assert_eq!(m.get(1), Some(&record("{itemType: B}")));
        assert!(VecModel::from_yaml_str("").unwrap().is_empty());
    }

    #[test]
    fn test_from_yaml_str_errors() {
        let e = VecModel::from_yaml_str("[{a: 1}, 2]").unwrap_err();
        assert_eq!(e.to_string(), "Expected a mapping for record 1, got Value::Number");
        let e = VecModel::from_yaml_str("a: 1").unwrap_err();
        assert_eq!(
            e.to_string(),
            "Expected a YAML sequence of records, got Value::Mapping"
        );
    }

    #[test]
    fn test_debug() {
        let mut m = VecModel::from(vec![Record::new()]);
        m.subscribe(|_| {});
        assert_eq!(
            format!("{m:?}"),
            "VecModel { records: [Record { fields: {} }], observers: 1, .. }"
        );
    }
}
