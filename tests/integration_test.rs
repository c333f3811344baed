use resource_reviews::clients::RELATED_LIMIT;
use resource_reviews::config::{PlatformConfig, RetryConfig};
use resource_reviews::doc_store::ChangeEvent;
use resource_reviews::lifecycle::ReviewPlatform;
use resource_reviews::model::{Author, AuthorId, RatingAggregate, ResourceCreate, ResourceId};
use resource_reviews::resource_actor::ResourceError;
use resource_reviews::reviews::ReviewError;

fn platform_with_attempts(max_attempts: u32) -> ReviewPlatform {
    let config = PlatformConfig {
        retry: RetryConfig {
            max_attempts,
            base_delay_ms: 0,
            max_delay_ms: 0,
        },
        ..Default::default()
    };
    ReviewPlatform::new(&config)
}

fn notes(title: &str, category: &str) -> ResourceCreate {
    ResourceCreate {
        title: title.to_string(),
        description: "Lecture notes".to_string(),
        category: category.to_string(),
        kind: "document".to_string(),
        author_id: AuthorId::new("uid-owner"),
        file_name: Some("notes.pdf".to_string()),
    }
}

fn student(n: usize) -> Author {
    Author::new(format!("uid-{n}")).with_display_name(format!("Student {n}"))
}

async fn aggregate_of(platform: &ReviewPlatform, id: ResourceId) -> (u64, f64) {
    let resource = platform.resources.get_resource(id).await.unwrap();
    (resource.review_count, resource.average_rating)
}

#[tokio::test]
async fn test_sequential_scenario() {
    let platform = platform_with_attempts(5);
    let id = platform
        .resources
        .create_resource(notes("Calculus", "Math"))
        .await
        .unwrap();

    for rating in [3, 5] {
        platform
            .reviews
            .submit_review(id, rating, "", Some(&student(0)))
            .await
            .unwrap();
    }
    assert_eq!(aggregate_of(&platform, id).await, (2, 4.0));

    let receipt = platform
        .reviews
        .submit_review(id, 5, "Even better on second read", Some(&student(1)))
        .await
        .unwrap();
    assert_eq!(receipt.review_count, 3);
    assert_eq!(receipt.attempts, 1);
    assert!((receipt.average_rating - 13.0 / 3.0).abs() < 1e-9);

    let (count, average) = aggregate_of(&platform, id).await;
    assert_eq!(count, 3);
    assert!((average - 4.333_333_333_3).abs() < 1e-9);

    platform.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_pair_scenario() {
    let platform = platform_with_attempts(5);
    let id = platform
        .resources
        .create_resource(notes("Calculus", "Math"))
        .await
        .unwrap();
    for rating in [4, 4] {
        platform
            .reviews
            .submit_review(id, rating, "", Some(&student(0)))
            .await
            .unwrap();
    }

    let first = platform.reviews.clone();
    let second = platform.reviews.clone();
    let a = tokio::spawn(async move { first.submit_review(id, 1, "", Some(&student(1))).await });
    let b = tokio::spawn(async move { second.submit_review(id, 5, "", Some(&student(2))).await });
    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    assert_eq!(aggregate_of(&platform, id).await, (4, 3.5));
    assert_eq!(platform.reviews.reviews(id).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_k_concurrent_submissions_lose_no_updates() {
    const K: usize = 16;
    let platform = platform_with_attempts(K as u32);
    let id = platform
        .resources
        .create_resource(notes("Physics", "Science"))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for n in 0..K {
        let reviews = platform.reviews.clone();
        let rating = (n % 5) as i32 + 1;
        handles.push(tokio::spawn(async move {
            reviews
                .submit_review(id, rating, "concurrent", Some(&student(n)))
                .await
        }));
    }

    for handle in handles {
        let receipt = handle.await.unwrap().expect("every submission must succeed");
        assert!(receipt.attempts as usize <= K);
    }

    let expected_sum: u64 = (0..K).map(|n| (n % 5) as u64 + 1).sum();
    let resource = platform.resources.get_resource(id).await.unwrap();
    assert_eq!(resource.review_count, K as u64);
    assert_eq!(resource.rating_sum, expected_sum);
    assert!((resource.average_rating - expected_sum as f64 / K as f64).abs() < 1e-9);

    let log = platform.reviews.reviews(id).await.unwrap();
    assert_eq!(log.len(), K);
    let logged_sum: u64 = log.iter().map(|r| u64::from(r.data.rating.value())).sum();
    assert_eq!(logged_sum, expected_sum);
}

#[tokio::test(start_paused = true)]
async fn test_backoff_spreads_a_burst_within_the_default_budget() {
    // More simultaneous submissions than the default budget has attempts: if retries
    // woke in lockstep only one would get through per round.
    const BURST: usize = 8;
    let platform = ReviewPlatform::new(&PlatformConfig::default());
    let id = platform
        .resources
        .create_resource(notes("Chemistry", "Science"))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for n in 0..BURST {
        let reviews = platform.reviews.clone();
        handles.push(tokio::spawn(async move {
            reviews.submit_review(id, 4, "", Some(&student(n))).await
        }));
    }

    let mut attempts = Vec::new();
    for handle in handles {
        let receipt = handle.await.unwrap().expect("burst submission must succeed");
        attempts.push(receipt.attempts);
    }

    assert!(BURST as u32 > PlatformConfig::default().retry.max_attempts);
    assert!(attempts.iter().any(|&a| a > 1), "burst saw no contention: {attempts:?}");
    assert_eq!(aggregate_of(&platform, id).await, (BURST as u64, 4.0));
    assert_eq!(platform.reviews.reviews(id).await.unwrap().len(), BURST);
}

#[tokio::test]
async fn test_invalid_ratings_leave_aggregate_unchanged() {
    let platform = platform_with_attempts(5);
    let id = platform
        .resources
        .create_resource(notes("Calculus", "Math"))
        .await
        .unwrap();
    platform
        .reviews
        .submit_review(id, 4, "", Some(&student(0)))
        .await
        .unwrap();

    for bad in [0, 6] {
        let err = platform
            .reviews
            .submit_review(id, bad, "", Some(&student(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::InvalidRating(r) if r == bad));
    }

    assert_eq!(aggregate_of(&platform, id).await, (1, 4.0));
    assert_eq!(platform.reviews.reviews(id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unauthenticated_submission() {
    let platform = platform_with_attempts(5);
    let id = platform
        .resources
        .create_resource(notes("Calculus", "Math"))
        .await
        .unwrap();

    let err = platform
        .reviews
        .submit_review(id, 5, "", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::Unauthenticated));
    assert_eq!(aggregate_of(&platform, id).await, (0, 0.0));
}

#[tokio::test]
async fn test_unknown_resource() {
    let platform = platform_with_attempts(5);

    let err = platform
        .reviews
        .submit_review(ResourceId(99), 5, "", Some(&student(0)))
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::NotFound(ResourceId(99))));

    let err = platform.reviews.reviews(ResourceId(99)).await.unwrap_err();
    assert!(matches!(err, ReviewError::NotFound(ResourceId(99))));
}

#[tokio::test]
async fn test_submission_is_not_idempotent() {
    let platform = platform_with_attempts(5);
    let id = platform
        .resources
        .create_resource(notes("Calculus", "Math"))
        .await
        .unwrap();
    let author = student(7);

    let first = platform
        .reviews
        .submit_review(id, 5, "Loved it", Some(&author))
        .await
        .unwrap();
    let second = platform
        .reviews
        .submit_review(id, 5, "Loved it", Some(&author))
        .await
        .unwrap();

    assert_ne!(first.review_id, second.review_id);
    assert_eq!(second.review_count, 2);
    assert_eq!(platform.reviews.reviews(id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_first_review_on_empty_resource() {
    let platform = platform_with_attempts(5);
    let id = platform
        .resources
        .create_resource(notes("Calculus", "Math"))
        .await
        .unwrap();
    assert_eq!(aggregate_of(&platform, id).await, (0, 0.0));

    let receipt = platform
        .reviews
        .submit_review(id, 2, "", Some(&student(0)))
        .await
        .unwrap();
    assert_eq!((receipt.review_count, receipt.average_rating), (1, 2.0));
}

#[tokio::test]
async fn test_reviews_are_newest_first() {
    let platform = platform_with_attempts(5);
    let id = platform
        .resources
        .create_resource(notes("Calculus", "Math"))
        .await
        .unwrap();

    for (n, text) in ["first", "second", "third"].into_iter().enumerate() {
        platform
            .reviews
            .submit_review(id, 4, text, Some(&student(n)))
            .await
            .unwrap();
    }

    let log = platform.reviews.reviews(id).await.unwrap();
    let texts: Vec<&str> = log.iter().map(|r| r.data.review_text.as_str()).collect();
    assert_eq!(texts, vec!["third", "second", "first"]);
    assert_eq!(log[0].data.author_name.as_deref(), Some("Student 2"));
    assert!(log[0].created_at >= log[2].created_at);
    assert_eq!(platform.resources.reviews(id).await.unwrap(), log);
}

#[tokio::test]
async fn test_resource_validation_and_details() {
    let platform = platform_with_attempts(5);

    let err = platform
        .resources
        .create_resource(notes("   ", "Math"))
        .await
        .unwrap_err();
    assert_eq!(err, ResourceError::MissingField("title"));

    let mut anonymous = notes("Calculus", "Math");
    anonymous.author_id = AuthorId::new("");
    let err = platform
        .resources
        .create_resource(anonymous)
        .await
        .unwrap_err();
    assert_eq!(err, ResourceError::MissingField("author_id"));

    let id = platform
        .resources
        .create_resource(notes("Calculus", "Math"))
        .await
        .unwrap();
    let uploaded = platform.resources.get_resource(id).await.unwrap().upload_date;
    platform
        .reviews
        .submit_review(id, 5, "", Some(&student(0)))
        .await
        .unwrap();

    let updated = platform
        .resources
        .update_details(id, Some("Calculus II".into()), None, None)
        .await
        .unwrap();
    assert_eq!(updated.title, "Calculus II");
    assert_eq!(updated.aggregate(), RatingAggregate::new(1, 5));
    assert_eq!(updated.upload_date, uploaded);

    let err = platform
        .resources
        .update_details(ResourceId(42), Some("x".into()), None, None)
        .await
        .unwrap_err();
    assert_eq!(err, ResourceError::NotFound("resource_42".into()));
}

#[tokio::test]
async fn test_concurrent_downloads_are_counted() {
    let platform = platform_with_attempts(5);
    let id = platform
        .resources
        .create_resource(notes("Calculus", "Math"))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let resources = platform.resources.clone();
        handles.push(tokio::spawn(
            async move { resources.increment_downloads(id).await },
        ));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(platform.resources.get_resource(id).await.unwrap().downloads, 10);
}

#[tokio::test]
async fn test_related_resources() {
    let platform = platform_with_attempts(5);
    let mut math = Vec::new();
    for title in ["Algebra", "Geometry", "Topology", "Statistics", "Calculus"] {
        math.push(
            platform
                .resources
                .create_resource(notes(title, "Math"))
                .await
                .unwrap(),
        );
    }
    platform
        .resources
        .create_resource(notes("Poetry", "Literature"))
        .await
        .unwrap();

    let related = platform
        .resources
        .related("Math", math[0], RELATED_LIMIT)
        .await
        .unwrap();
    let titles: Vec<&str> = related.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Geometry", "Topology", "Statistics"]);

    let none = platform
        .resources
        .related("History", math[0], RELATED_LIMIT)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_watchers_see_new_aggregates() {
    let platform = platform_with_attempts(5);
    let id = platform
        .resources
        .create_resource(notes("Calculus", "Math"))
        .await
        .unwrap();
    let mut changes = platform.resources.watch();

    platform
        .reviews
        .submit_review(id, 3, "", Some(&student(0)))
        .await
        .unwrap();

    match changes.recv().await.unwrap() {
        ChangeEvent::Updated { id: changed, document } => {
            assert_eq!(changed, id);
            assert_eq!(document.data.review_count, 1);
            assert_eq!(document.data.average_rating, 3.0);
        }
        other => panic!("Expected Updated, got {:?}", other),
    }
}

#[tokio::test]
async fn test_platform_shutdown() {
    let platform = ReviewPlatform::new(&PlatformConfig::default());
    platform
        .resources
        .create_resource(notes("Calculus", "Math"))
        .await
        .unwrap();

    assert!(platform.shutdown().await.is_ok());
}
