//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing` subscriber used by the demo binary. Every store
//! and client log line is structured, so a submission can be followed across the retry loop
//! and the store actor.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Submissions, commits and conflicts
//! RUST_LOG=info cargo run
//!
//! # Also show every read, the computed aggregate and each backoff
//! RUST_LOG=debug cargo run
//!
//! # Only the review workflow
//! RUST_LOG=resource_reviews::reviews=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: `Store started` / `Shutdown` with `entity_type` and final size
//! - **Writes**: `Created`, `Updated`, `Committed` with the document `id` and new `version`
//! - **Contention**: `Commit conflict` with `expected_version` and `actual_version`
//! - **Submissions**: a `submit_review` span carrying `resource_id` and `rating`, one
//!   `Committing review` event per attempt, and `Review submitted` or
//!   `Review abandoned` at the end
//!
//! ## Workflow Trace Example
//!
//! Two submissions racing on the same resource, with `RUST_LOG=info`:
//!
//! ```text
//! INFO Created entity_type="Resource" id=resource_1 size=1
//! INFO submit_review: Committed entity_type="Resource" id=resource_1 version=2 records=1
//! INFO submit_review: Review submitted review_id=rec_1 attempt=1 review_count=1 average_rating=5.0
//! INFO submit_review: Commit conflict entity_type="Resource" id=resource_1 expected_version=1 actual_version=2
//! INFO submit_review: Committed entity_type="Resource" id=resource_1 version=3 records=1
//! INFO submit_review: Review submitted review_id=rec_2 attempt=2 review_count=2 average_rating=3.0
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type identifies the store instead
        .compact()
        .init();
}
