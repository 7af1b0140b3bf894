use tracing::{debug, trace};

use crate::config::Config;
use crate::error::ReconcileError;
use crate::model::ListModel;
use crate::types::{ItemKey, Record, Value};

/// Describes what [`Reconciler::find_or_insert()`] did to the model.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reconciled {
    /// The record already was at the start position.
    InPlace,
    /// The record was found at position `from` and moved to the start position.
    Moved { from: usize },
    /// No matching record existed, a new one was inserted at the start position.
    Inserted,
}

impl Reconciled {
    /// Returns true if the model was modified.
    #[must_use]
    pub fn changed(&self) -> bool {
        !matches!(self, Self::InPlace)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::InPlace => "in_place",
            Self::Moved { .. } => "moved",
            Self::Inserted => "inserted",
        }
    }
}

/// Keeps a list model in sync with an externally defined order of (type, index) items.
///
/// The reconciler is stateless apart from the field names it's configured with. All operations
/// run synchronously and assume exclusive access to the model for the duration of the call.
#[derive(Clone, Debug, Default)]
pub struct Reconciler {
    config: Config,
}

impl Reconciler {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Checks if `r` is the record identified by `key`. Records without a well-formed type or
    /// index field never match.
    fn matches(&self, pos: usize, r: &Record, key: &ItemKey) -> bool {
        match (r.item_type(&self.config), r.item_index(&self.config)) {
            (Some(t), Some(i)) => t == key.item_type && i == key.item_index,
            _ => {
                trace!(pos, record = %r, "skipping record without item key");
                false
            }
        }
    }

    /// Makes sure the record identified by (`item_type`, `item_index`) is at `start_index`.
    ///
    /// The model is scanned from `start_index` to its end. The first matching record is moved to
    /// `start_index`, leaving the relative order of all other records untouched. If no record
    /// matches, a new record is created from `extra` and inserted at `start_index`. The type and
    /// index fields of the new record are always set from the key, even if `extra` contains them.
    ///
    /// `start_index == model.count()` appends. Returns `ReconcileError::OutOfRange` if
    /// `start_index` is past the end of the model.
    pub fn find_or_insert<M: ListModel + ?Sized>(
        &self,
        item_type: &str,
        item_index: i64,
        start_index: usize,
        model: &mut M,
        extra: Record,
    ) -> Result<Reconciled, ReconcileError> {
        let count = model.count();
        if start_index > count {
            return Err(ReconcileError::out_of_range("find_or_insert", start_index, count));
        }
        let key = ItemKey::new(item_type, item_index);

        let found = (start_index..count)
            .find(|&pos| model.get(pos).is_some_and(|r| self.matches(pos, r, &key)));

        match found {
            Some(pos) if pos == start_index => {
                debug!(%key, pos, "record already in place");
                Ok(Reconciled::InPlace)
            }
            Some(pos) => {
                debug!(%key, from = pos, to = start_index, "moving record");
                model.move_range(pos, start_index, 1)?;
                Ok(Reconciled::Moved { from: pos })
            }
            None => {
                debug!(%key, pos = start_index, "inserting new record");
                let mut record = extra;
                record.insert(&self.config.type_field, Value::from(key.item_type));
                record.insert(&self.config.index_field, Value::from(key.item_index));
                model.insert(start_index, record)?;
                Ok(Reconciled::Inserted)
            }
        }
    }

    /// Removes all records at positions >= `from_index` and marks the final remaining record as
    /// the last one, see [`Reconciler::mark_last()`].
    pub fn truncate_and_mark_last<M: ListModel + ?Sized>(
        &self,
        model: &mut M,
        from_index: usize,
    ) -> Result<(), ReconcileError> {
        let removed = model.count().saturating_sub(from_index);
        while model.count() > from_index {
            model.remove(from_index)?;
        }
        if removed > 0 {
            debug!(from_index, removed, "truncated model");
        }
        self.mark_last(model)
    }

    /// Sets the last-marker field of every record: `true` for the final record of the model,
    /// `false` for all others.
    pub fn mark_last<M: ListModel + ?Sized>(&self, model: &mut M) -> Result<(), ReconcileError> {
        let count = model.count();
        for pos in 0..count {
            model.set_field(pos, &self.config.last_field, Value::Bool(pos + 1 == count))?;
        }
        Ok(())
    }
}
