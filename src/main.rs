use resource_reviews::config::PlatformConfig;
use resource_reviews::lifecycle::{setup_tracing, ReviewPlatform};
use resource_reviews::model::{Author, AuthorId, ResourceCreate, StarDisplay};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = PlatformConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting resource reviews demo");

    let platform = ReviewPlatform::new(&config);

    let resource_id = platform
        .resources
        .create_resource(ResourceCreate {
            title: "Organic Chemistry Summary".to_string(),
            description: "Reaction mechanisms, chapters 1-8".to_string(),
            category: "Chemistry".to_string(),
            kind: "document".to_string(),
            author_id: AuthorId::new("uid-owner"),
            file_name: Some("orgo.pdf".to_string()),
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(%resource_id, "Resource published");

    // A burst of students reviewing at the same moment.
    let span = tracing::info_span!("review_burst");
    let results = async {
        let mut handles = Vec::new();
        for (n, rating) in [5, 4, 5, 3, 1, 5, 4, 2].into_iter().enumerate() {
            let reviews = platform.reviews.clone();
            let author = Author::new(format!("uid-{n}")).with_display_name(format!("Student {n}"));
            handles.push(tokio::spawn(async move {
                reviews
                    .submit_review(resource_id, rating, "Helpful", Some(&author))
                    .await
            }));
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.map_err(|e| e.to_string())?);
        }
        Ok::<_, String>(results)
    }
    .instrument(span)
    .await?;

    for result in results {
        match result {
            Ok(receipt) => info!(
                review_id = %receipt.review_id,
                attempts = receipt.attempts,
                "Review accepted"
            ),
            Err(e) => error!(error = %e, "Review failed"),
        }
    }

    let resource = platform
        .resources
        .get_resource(resource_id)
        .await
        .map_err(|e| e.to_string())?;
    let stars = StarDisplay::new(resource.average_rating);
    info!(
        review_count = resource.review_count,
        average_rating = resource.average_rating,
        "{}",
        stars
    );

    platform.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
