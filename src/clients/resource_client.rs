use crate::model::{Resource, ResourceCreate, ResourceId, ResourceUpdate, Review};
use crate::resource_actor::{ResourceAction, ResourceActionResult, ResourceError};
use async_trait::async_trait;
use doc_store::{ChangeEvent, DocumentClient, StoreError, StoredRecord, TypedClient};
use tokio::sync::broadcast;
use tracing::{debug, instrument};

/// How many related resources a detail page shows by default.
pub const RELATED_LIMIT: usize = 3;

/// Client for interacting with the Resource actor.
#[derive(Clone)]
pub struct ResourceClient {
    inner: DocumentClient<Resource>,
}

impl ResourceClient {
    pub fn new(inner: DocumentClient<Resource>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TypedClient<Resource> for ResourceClient {
    type Error = ResourceError;

    fn inner(&self) -> &DocumentClient<Resource> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::NotFound(id) => ResourceError::NotFound(id),
            StoreError::EntityError(inner) => match inner.downcast::<ResourceError>() {
                Ok(typed) => *typed,
                Err(other) => ResourceError::StoreError(other.to_string()),
            },
            other => ResourceError::StoreError(other.to_string()),
        }
    }
}

impl ResourceClient {
    #[instrument(skip(self))]
    pub async fn create_resource(&self, params: ResourceCreate) -> Result<ResourceId, ResourceError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// The current state of one resource.
    #[instrument(skip(self))]
    pub async fn get_resource(&self, id: ResourceId) -> Result<Resource, ResourceError> {
        self.get(id)
            .await?
            .map(|doc| doc.data)
            .ok_or_else(|| ResourceError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn all_resources(&self) -> Result<Vec<Resource>, ResourceError> {
        Ok(self.list().await?.into_iter().map(|doc| doc.data).collect())
    }

    #[instrument(skip(self))]
    pub async fn update_details(
        &self,
        id: ResourceId,
        title: Option<String>,
        description: Option<String>,
        category: Option<String>,
    ) -> Result<Resource, ResourceError> {
        debug!("Sending request");
        let update = ResourceUpdate::Details {
            title,
            description,
            category,
        };
        self.inner
            .update(id, update)
            .await
            .map(|doc| doc.data)
            .map_err(Self::map_error)
    }

    /// Counts one download and returns the new total.
    #[instrument(skip(self))]
    pub async fn increment_downloads(&self, id: ResourceId) -> Result<u64, ResourceError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ResourceAction::IncrementDownloads)
            .await
            .map_err(Self::map_error)?
        {
            ResourceActionResult::IncrementDownloads(total) => Ok(total),
        }
    }

    /// Up to `limit` other resources in `category`, ordered by id.
    #[instrument(skip(self))]
    pub async fn related(
        &self,
        category: &str,
        exclude: ResourceId,
        limit: usize,
    ) -> Result<Vec<Resource>, ResourceError> {
        Ok(self
            .all_resources()
            .await?
            .into_iter()
            .filter(|r| r.category == category && r.id != exclude)
            .take(limit)
            .collect())
    }

    /// Reviews of one resource, newest first.
    #[instrument(skip(self))]
    pub async fn reviews(
        &self,
        id: ResourceId,
    ) -> Result<Vec<StoredRecord<Review>>, ResourceError> {
        self.inner.records(id).await.map_err(Self::map_error)
    }

    /// Live feed of every committed resource write.
    pub fn watch(&self) -> broadcast::Receiver<ChangeEvent<Resource>> {
        self.inner.subscribe()
    }
}
