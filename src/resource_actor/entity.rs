//! DocumentEntity trait implementation for the [`Resource`] domain type.
//!
//! Creation validates the required fields. Review aggregate writes are checked against the
//! stored aggregate so that the counters can only ever advance one review at a time.

use super::actions::{ResourceAction, ResourceActionResult};
use super::error::ResourceError;
use crate::model::{Resource, ResourceCreate, ResourceId, ResourceUpdate, Review};
use async_trait::async_trait;
use doc_store::DocumentEntity;

#[async_trait]
impl DocumentEntity for Resource {
    type Id = ResourceId;
    type Create = ResourceCreate;
    type Update = ResourceUpdate;
    type Action = ResourceAction;
    type ActionResult = ResourceActionResult;
    type Record = Review;
    type Context = ();
    type Error = ResourceError;

    /// Title and author are required; the title is stored trimmed.
    fn from_create_params(id: ResourceId, params: ResourceCreate) -> Result<Self, Self::Error> {
        if params.title.trim().is_empty() {
            return Err(ResourceError::MissingField("title"));
        }
        if params.author_id.is_empty() {
            return Err(ResourceError::MissingField("author_id"));
        }
        let mut resource = Resource::new(id, params);
        resource.title = resource.title.trim().to_string();
        Ok(resource)
    }

    /// # Updates
    /// - `Details`: replaces the given descriptive fields
    /// - `RecordReview`: installs the next aggregate; rejected with `AggregateMismatch`
    ///   unless it extends the stored one by exactly one rating
    async fn on_update(
        &mut self,
        update: ResourceUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        match update {
            ResourceUpdate::Details {
                title,
                description,
                category,
            } => {
                if let Some(title) = title {
                    if title.trim().is_empty() {
                        return Err(ResourceError::MissingField("title"));
                    }
                    self.title = title.trim().to_string();
                }
                if let Some(description) = description {
                    self.description = description;
                }
                if let Some(category) = category {
                    self.category = category;
                }
            }
            ResourceUpdate::RecordReview(next) => {
                let current = self.aggregate();
                if !current.is_followed_by(&next) {
                    return Err(ResourceError::AggregateMismatch {
                        current,
                        proposed: next,
                    });
                }
                self.set_aggregate(next);
            }
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ResourceAction,
        _ctx: &Self::Context,
    ) -> Result<ResourceActionResult, Self::Error> {
        match action {
            ResourceAction::IncrementDownloads => {
                self.downloads += 1;
                Ok(ResourceActionResult::IncrementDownloads(self.downloads))
            }
        }
    }
}
