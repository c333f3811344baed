//! Review submission and aggregate maintenance.
//!
//! [`ReviewService::submit_review`] is the only writer of a resource's rating aggregate.
//! It runs as Reading → Computing → Committing, and on a version conflict goes through
//! Retrying back to Reading until the [`RetryPolicy`] budget is spent.

pub mod error;
pub mod maintainer;
pub mod retry;

pub use error::*;
pub use maintainer::*;
pub use retry::*;
