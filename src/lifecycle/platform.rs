use crate::clients::ResourceClient;
use crate::config::PlatformConfig;
use crate::reviews::{RetryPolicy, ReviewService};
use doc_store::TypedClient;
use tracing::{error, info};

/// The running application: the resource store plus the services built on it.
///
/// # Example
///
/// ```ignore
/// let platform = ReviewPlatform::new(&PlatformConfig::default());
///
/// let id = platform.resources.create_resource(params).await?;
/// platform.reviews.submit_review(id, 5, "Great notes", Some(&author)).await?;
///
/// platform.shutdown().await?;
/// ```
pub struct ReviewPlatform {
    /// Client for the Resource store
    pub resources: ResourceClient,

    /// Review submission, sharing the Resource store
    pub reviews: ReviewService,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ReviewPlatform {
    /// Spawns the Resource store and wires the review service to it.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: &PlatformConfig) -> Self {
        let (resource_actor, resources) = crate::resource_actor::new(config.store.channel_buffer);
        let handle = tokio::spawn(resource_actor.run(()));

        let policy = RetryPolicy::from(&config.retry);
        let reviews = ReviewService::new(resources.inner().clone(), policy);
        info!(
            max_attempts = policy.max_attempts,
            channel_buffer = config.store.channel_buffer,
            "Platform started"
        );

        Self {
            resources,
            reviews,
            handles: vec![handle],
        }
    }

    /// Gracefully shuts down the platform.
    ///
    /// Dropping the clients closes the store's request channel; the store drains what is
    /// already queued and exits. Clones handed out earlier keep the store alive until they
    /// are dropped too.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if every store task shut down cleanly
    /// - `Err(String)` if a store task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down platform...");

        drop(self.reviews);
        drop(self.resources);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Platform shutdown complete.");
        Ok(())
    }
}
