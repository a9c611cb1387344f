//! Error types for kitchen operations.

use crate::eviction::EvictionError;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can cross the kitchen boundary.
///
/// "Not found" and "full" are not errors: they come back as `Option`/`bool`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum KitchenError {
    /// The configuration was rejected at startup.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Internal state broke a guarantee it relies on.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Eviction(#[from] EvictionError),

    /// The kitchen actor is no longer accepting requests.
    #[error("Kitchen actor closed")]
    ActorClosed,

    /// The kitchen actor went away before answering.
    #[error("Kitchen actor dropped response channel")]
    ActorDropped,
}

impl KitchenError {
    /// Whether this error means the kitchen state can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            KitchenError::InvariantViolation(_)
                | KitchenError::Eviction(_)
                | KitchenError::Storage(StorageError::RollbackFailed { .. })
        )
    }
}
