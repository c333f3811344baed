//! Error types for review submission.

use crate::model::ResourceId;
use doc_store::StoreError;
use thiserror::Error;

/// Errors returned by [`ReviewService`](super::ReviewService).
///
/// A version conflict on commit is not listed: it is retried internally and only surfaces
/// as [`ReviewError::ConflictExhausted`] once the retry budget is spent.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The rating was outside 1..=5. Nothing was read or written.
    #[error("Rating must be an integer between 1 and 5, got {0}")]
    InvalidRating(i32),

    /// The resource does not exist (or was deleted mid-submission).
    #[error("Resource not found: {0}")]
    NotFound(ResourceId),

    /// No signed-in author was supplied.
    #[error("Please log in to leave a review")]
    Unauthenticated,

    /// Every attempt lost the race to a concurrent write.
    #[error("Gave up on {resource_id} after {attempts} conflicting attempts")]
    ConflictExhausted {
        resource_id: ResourceId,
        attempts: u32,
    },

    /// The commit went through but the store did not hand back the review's record id.
    #[error("Store committed {0} without returning the review record")]
    ReviewNotRecorded(ResourceId),

    /// The store failed for a reason other than contention.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
