mod vec_model;

use crate::error::ReconcileError;
use crate::types::{Record, Value};

/// Defines the operations the reconciler needs from an ordered, mutable list of records.
///
/// The model is owned by the caller (usually a UI binding layer). Positions are 0-indexed. All
/// mutating operations fail with a [`ReconcileError`] instead of clamping positions which are out
/// of range.
pub trait ListModel {
    /// Returns the number of records in the model.
    fn count(&self) -> usize;

    /// Returns the record at `pos`, if there is one.
    fn get(&self, pos: usize) -> Option<&Record>;

    /// Inserts `record` at `pos`, shifting all records at positions >= `pos` down by one.
    /// `pos == count()` appends.
    fn insert(&mut self, pos: usize, record: Record) -> Result<(), ReconcileError>;

    /// Removes and returns the record at `pos`.
    fn remove(&mut self, pos: usize) -> Result<Record, ReconcileError>;

    /// Moves the `len` records starting at `from` so that the first of them ends up at position
    /// `to`. Both `from..from + len` and `to..to + len` must lie within the model.
    fn move_range(&mut self, from: usize, to: usize, len: usize) -> Result<(), ReconcileError>;

    /// Sets field `field` of the record at `pos` to `value`, adding the field if necessary.
    fn set_field(&mut self, pos: usize, field: &str, value: Value) -> Result<(), ReconcileError>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

pub use vec_model::*;

/// Checks the block move preconditions and performs the move on `items`.
fn move_block<T>(
    items: &mut [T],
    from: usize,
    to: usize,
    len: usize,
) -> Result<(), ReconcileError> {
    let count = items.len();
    let fits = |start: usize| start.checked_add(len).is_some_and(|end| end <= count);
    if !fits(from) || !fits(to) {
        return Err(ReconcileError::InvalidMove {
            from,
            to,
            len,
            count,
        });
    }
    if len == 0 || from == to {
        return Ok(());
    }
    if from < to {
        items[from..to + len].rotate_left(len);
    } else {
        items[to..from + len].rotate_right(len);
    }
    Ok(())
}

/// A plain `Vec<Record>` is a list model without change notifications.
impl ListModel for Vec<Record> {
    #[inline]
    fn count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn get(&self, pos: usize) -> Option<&Record> {
        self.as_slice().get(pos)
    }

    fn insert(&mut self, pos: usize, record: Record) -> Result<(), ReconcileError> {
        if pos > self.len() {
            return Err(ReconcileError::out_of_range("insert", pos, self.len()));
        }
        Vec::insert(self, pos, record);
        Ok(())
    }

    fn remove(&mut self, pos: usize) -> Result<Record, ReconcileError> {
        if pos >= self.len() {
            return Err(ReconcileError::out_of_range("remove", pos, self.len()));
        }
        Ok(Vec::remove(self, pos))
    }

    fn move_range(&mut self, from: usize, to: usize, len: usize) -> Result<(), ReconcileError> {
        move_block(self, from, to, len)
    }

    fn set_field(&mut self, pos: usize, field: &str, value: Value) -> Result<(), ReconcileError> {
        let count = self.len();
        let r = self
            .get_mut(pos)
            .ok_or_else(|| ReconcileError::out_of_range("set_field", pos, count))?;
        r.insert(field, value);
        Ok(())
    }
}
