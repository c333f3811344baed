use super::{AuthorId, RatingAggregate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource_{}", self.0)
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        ResourceId(id)
    }
}

/// A shared study resource (document upload or blog post).
///
/// # Document Store
/// This struct implements the [`DocumentEntity`](doc_store::DocumentEntity) trait,
/// allowing it to be managed by a [`DocumentActor`](doc_store::DocumentActor).
///
/// See [`impl DocumentEntity for Resource`](#impl-DocumentEntity-for-Resource) for details on:
/// - Creation parameters ([`ResourceCreate`])
/// - Update parameters ([`ResourceUpdate`])
/// - Custom actions ([`ResourceAction`](crate::resource_actor::ResourceAction))
///
/// The review aggregate (`review_count`, `rating_sum`, `average_rating`) is only ever
/// written through [`ResourceUpdate::RecordReview`], together with the review it counts.
/// A stored `averageRating` is ignored on load and recomputed from the counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredResource")]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub kind: String,
    pub author_id: AuthorId,
    pub file_name: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub downloads: u64,
    pub review_count: u64,
    pub rating_sum: u64,
    pub average_rating: f64,
}

/// Wire shape of a stored [`Resource`]. Has no average: that is derived.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredResource {
    id: ResourceId,
    title: String,
    description: String,
    category: String,
    kind: String,
    author_id: AuthorId,
    file_name: Option<String>,
    upload_date: DateTime<Utc>,
    #[serde(default)]
    downloads: u64,
    #[serde(default)]
    review_count: u64,
    #[serde(default)]
    rating_sum: u64,
}

impl From<StoredResource> for Resource {
    fn from(stored: StoredResource) -> Self {
        let mut resource = Self {
            id: stored.id,
            title: stored.title,
            description: stored.description,
            category: stored.category,
            kind: stored.kind,
            author_id: stored.author_id,
            file_name: stored.file_name,
            upload_date: stored.upload_date,
            downloads: stored.downloads,
            review_count: 0,
            rating_sum: 0,
            average_rating: 0.0,
        };
        resource.set_aggregate(RatingAggregate::new(stored.review_count, stored.rating_sum));
        resource
    }
}

impl Resource {
    /// Creates a Resource uploaded now, with an empty review aggregate and no downloads.
    pub fn new(id: ResourceId, params: ResourceCreate) -> Self {
        Self {
            id,
            title: params.title,
            description: params.description,
            category: params.category,
            kind: params.kind,
            author_id: params.author_id,
            file_name: params.file_name,
            upload_date: Utc::now(),
            downloads: 0,
            review_count: 0,
            rating_sum: 0,
            average_rating: 0.0,
        }
    }

    pub fn aggregate(&self) -> RatingAggregate {
        RatingAggregate::new(self.review_count, self.rating_sum)
    }

    pub(crate) fn set_aggregate(&mut self, aggregate: RatingAggregate) {
        self.review_count = aggregate.count;
        self.rating_sum = aggregate.sum;
        self.average_rating = aggregate.average();
    }
}

/// DTO for Resource creation.
#[derive(Debug, Clone, Default)]
pub struct ResourceCreate {
    pub title: String,
    pub description: String,
    pub category: String,
    pub kind: String,
    pub author_id: AuthorId,
    pub file_name: Option<String>,
}

/// DTOs for Resource writes.
#[derive(Debug, Clone)]
pub enum ResourceUpdate {
    /// Edit the descriptive fields; `None` leaves a field unchanged.
    Details {
        title: Option<String>,
        description: Option<String>,
        category: Option<String>,
    },
    /// Replace the review aggregate with one that counts exactly one more review.
    RecordReview(RatingAggregate),
}
