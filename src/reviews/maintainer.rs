use super::error::ReviewError;
use super::retry::RetryPolicy;
use crate::model::{Author, Rating, Resource, ResourceId, ResourceUpdate, Review};
use doc_store::{DocumentClient, RecordId, StoreError, StoredRecord};
use tracing::{debug, info, instrument, warn};

/// What a successful submission wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewReceipt {
    pub review_id: RecordId,
    pub resource_id: ResourceId,
    /// Aggregate as committed together with this review.
    pub review_count: u64,
    pub average_rating: f64,
    /// Attempts it took, 1 when there was no contention.
    pub attempts: u32,
}

/// Appends reviews and keeps each resource's rating aggregate in step with them.
///
/// Every submission is an optimistic transaction against the resource document: read it
/// with its version, compute the next aggregate, then commit the aggregate and the review
/// record conditioned on that version. Losing a race re-reads and tries again, up to
/// [`RetryPolicy::max_attempts`] attempts. Submissions never wait on each other.
#[derive(Clone)]
pub struct ReviewService {
    store: DocumentClient<Resource>,
    policy: RetryPolicy,
}

impl ReviewService {
    pub fn new(store: DocumentClient<Resource>, policy: RetryPolicy) -> Self {
        Self { store, policy }
    }

    /// Submits one review.
    ///
    /// Not idempotent: calling twice with the same input stores two reviews.
    ///
    /// # Errors
    /// - [`ReviewError::Unauthenticated`] if `author` is missing or has a blank id
    /// - [`ReviewError::InvalidRating`] if `rating` is outside 1..=5
    /// - [`ReviewError::NotFound`] if the resource does not exist
    /// - [`ReviewError::ConflictExhausted`] if every attempt hit a concurrent write
    #[instrument(skip(self, resource_id, review_text, author), fields(%resource_id))]
    pub async fn submit_review(
        &self,
        resource_id: ResourceId,
        rating: i32,
        review_text: &str,
        author: Option<&Author>,
    ) -> Result<ReviewReceipt, ReviewError> {
        let author = match author {
            Some(author) if !author.id.is_empty() => author,
            _ => {
                warn!("Review rejected: no signed-in author");
                return Err(ReviewError::Unauthenticated);
            }
        };
        let rating = Rating::try_from(rating).map_err(|e| {
            warn!(rating = e.0, "Review rejected: rating out of range");
            ReviewError::InvalidRating(e.0)
        })?;
        let review = Review::new(rating, review_text, author);

        let max_attempts = self.policy.attempts();
        let mut attempt = 0;
        loop {
            attempt += 1;

            let snapshot = self
                .store
                .get(resource_id)
                .await?
                .ok_or(ReviewError::NotFound(resource_id))?;
            let next = snapshot.data.aggregate().with(rating);
            debug!(attempt, version = snapshot.version, ?next, "Committing review");

            let committed = self
                .store
                .commit(
                    resource_id,
                    snapshot.version,
                    ResourceUpdate::RecordReview(next),
                    vec![review.clone()],
                )
                .await;

            match committed {
                Ok(receipt) => {
                    let Some(&review_id) = receipt.records.first() else {
                        warn!(attempt, "Commit receipt is missing the review record");
                        return Err(ReviewError::ReviewNotRecorded(resource_id));
                    };
                    let resource = receipt.document.data;
                    info!(
                        %review_id,
                        attempt,
                        review_count = resource.review_count,
                        average_rating = resource.average_rating,
                        "Review submitted"
                    );
                    return Ok(ReviewReceipt {
                        review_id,
                        resource_id,
                        review_count: resource.review_count,
                        average_rating: resource.average_rating,
                        attempts: attempt,
                    });
                }
                Err(StoreError::NotFound(_)) => return Err(ReviewError::NotFound(resource_id)),
                Err(e) if e.is_conflict() => {
                    if attempt >= max_attempts {
                        warn!(attempts = attempt, "Review abandoned: retry budget exhausted");
                        return Err(ReviewError::ConflictExhausted {
                            resource_id,
                            attempts: attempt,
                        });
                    }
                    let delay = self.policy.delay_for(attempt);
                    debug!(attempt, ?delay, error = %e, "Conflict, retrying");
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Reviews of one resource, newest first.
    #[instrument(skip(self))]
    pub async fn reviews(
        &self,
        resource_id: ResourceId,
    ) -> Result<Vec<StoredRecord<Review>>, ReviewError> {
        self.store.records(resource_id).await.map_err(|e| match e {
            StoreError::NotFound(_) => ReviewError::NotFound(resource_id),
            other => ReviewError::Store(other),
        })
    }
}
