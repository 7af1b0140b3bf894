use thiserror::Error;

/// Errors returned by [`crate::ListModel`] implementations and the [`crate::Reconciler`].
///
/// All variants describe precondition violations by the caller. None of them are retried
/// internally.
#[non_exhaustive]
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ReconcileError {
    /// A position argument doesn't address a valid slot in the model. Negative positions can
    /// only be passed in through the Python bindings.
    #[error("{operation}: position {position} is out of range for a model with {count} records")]
    OutOfRange {
        operation: &'static str,
        position: i64,
        count: usize,
    },

    /// A block move whose source or destination range doesn't fit in the model.
    #[error("move: can't move {len} record(s) from {from} to {to} in a model with {count} records")]
    InvalidMove {
        from: usize,
        to: usize,
        len: usize,
        count: usize,
    },
}

impl ReconcileError {
    pub(crate) fn out_of_range(operation: &'static str, position: usize, count: usize) -> Self {
        Self::OutOfRange {
            operation,
            position: i64::try_from(position).unwrap_or(i64::MAX),
            count,
        }
    }

    /// Converts a signed position into a model position, rejecting negative values.
    pub(crate) fn check_position(
        operation: &'static str,
        position: i64,
        count: usize,
    ) -> Result<usize, Self> {
        usize::try_from(position).map_err(|_| Self::OutOfRange {
            operation,
            position,
            count,
        })
    }

    /// Check if this error was caused by a position outside of the model.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::InvalidMove { .. })
    }
}
