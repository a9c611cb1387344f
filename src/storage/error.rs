//! Error types for the storage layer.

use crate::model::StorageKind;
use thiserror::Error;

/// Errors raised by [`Storage`](crate::storage::Storage).
///
/// A full compartment or a missing order is not an error; those are reported
/// through `bool` and `Option` returns.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    /// A compartment was configured without room for a single order.
    #[error("Invalid capacity for {kind}: {capacity}")]
    InvalidCapacity { kind: StorageKind, capacity: usize },

    /// A failed move could not put the order back where it came from.
    #[error("Rollback failed, order {order_id} is no longer stored anywhere")]
    RollbackFailed { order_id: String },
}
