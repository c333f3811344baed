//! Error types for the Resource actor.

use crate::model::RatingAggregate;
use thiserror::Error;

/// Errors that can occur during resource operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A field required to publish a resource was empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A review aggregate write did not count exactly one more review than is stored.
    #[error("Aggregate mismatch: stored {current:?}, proposed {proposed:?}")]
    AggregateMismatch {
        current: RatingAggregate,
        proposed: RatingAggregate,
    },

    /// An error occurred while communicating with the store.
    #[error("Store communication error: {0}")]
    StoreError(String),
}
