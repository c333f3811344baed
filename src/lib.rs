//! # Resource Reviews
//!
//! > **Student study resources with concurrently maintained ratings.**
//!
//! Students publish study resources (document uploads and blog posts) and review each
//! other's work with one to five stars. Every resource carries `reviewCount` and
//! `averageRating` so listings never have to scan reviews. Keeping those two numbers
//! equal to what the review log says, while many students submit at once, is the core
//! of this crate.
//!
//! ## Core Concepts
//!
//! ### Optimistic aggregate maintenance
//! A submission reads the resource together with its version, computes the next
//! aggregate, and commits the aggregate and the new review in one conditional step. If
//! another write landed in between, the commit is refused and the submission starts over
//! from a fresh read. Nothing is locked; losers retry. With K concurrent submissions and a
//! budget of at least K attempts every submission succeeds, because each failed attempt
//! is caused by a different successful commit.
//!
//! ### Exact aggregates
//! The stored aggregate is an integer `(count, sum)` pair. The average is derived from it
//! on every write, so it cannot drift however many reviews arrive.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`doc_store`])
//! A generic actor-owned document store: versioned snapshots, optimistic commits, record
//! logs beneath each document and change subscriptions.
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: starts the store and wires the services to it.
//! - **Key items**: [`ReviewPlatform`](lifecycle::ReviewPlatform),
//!   [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ### 3. The Interface ([`clients`], [`reviews`])
//! - [`ResourceClient`](clients::ResourceClient) publishes, lists and updates resources.
//! - [`ReviewService`](reviews::ReviewService) submits reviews and owns the aggregate.
//!
//! ### 4. The Implementation ([`resource_actor`], [`model`])
//! - `impl DocumentEntity for Resource`, including the guard that only lets the aggregate
//!   advance one review at a time.
//! - Plain data: [`Resource`](model::Resource), [`Review`](model::Review),
//!   [`Rating`](model::Rating), [`StarDisplay`](model::StarDisplay).
//!
//! ## Configuration
//! See [`config`]. Defaults: 5 attempts, with a random backoff whose ceiling starts at
//! 10 ms and doubles up to 200 ms.
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod resource_actor;
pub mod reviews;

pub use doc_store;
