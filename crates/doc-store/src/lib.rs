//! # Document Store
//!
//! An in-process, actor-backed document store with optimistic concurrency. Each document
//! type gets its own [`DocumentActor`] that owns the documents, a version counter per
//! document and an append-only record log beneath each document (a sub-collection).
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`DocumentEntity`]) - the document type and its write hooks
//! 2. **Runtime Layer** ([`DocumentActor`]) - message processing, versions, record logs
//! 3. **Interface Layer** ([`DocumentClient`], [`TypedClient`]) - type-safe communication
//!
//! ## Optimistic Transactions
//!
//! Every snapshot comes back as [`Versioned<T>`]. A read-modify-write reads a snapshot,
//! computes the new state from it and sends a [`DocumentClient::commit`] conditioned on the
//! version it read. If another writer got there first the commit fails with
//! [`StoreError::Conflict`] and nothing is written; the caller re-reads and tries again.
//! The document write and the record append of one commit are applied together or not at
//! all.
//!
//! ```rust
//! use async_trait::async_trait;
//! use doc_store::{DocumentActor, DocumentEntity, StoreError};
//!
//! #[derive(Clone, Debug)]
//! struct Tally { id: u32, total: u64 }
//!
//! #[derive(Debug)] struct TallyCreate;
//! #[derive(Debug)] struct TallyUpdate { total: u64 }
//! #[derive(Debug)] struct TallyError;
//! impl std::fmt::Display for TallyError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "tally error") }
//! }
//! impl std::error::Error for TallyError {}
//!
//! #[async_trait]
//! impl DocumentEntity for Tally {
//!     type Id = u32;
//!     type Create = TallyCreate;
//!     type Update = TallyUpdate;
//!     type Action = ();
//!     type ActionResult = ();
//!     type Record = u64;
//!     type Context = ();
//!     type Error = TallyError;
//!
//!     fn from_create_params(id: u32, _: TallyCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, total: 0 })
//!     }
//!
//!     async fn on_update(&mut self, update: TallyUpdate, _: &()) -> Result<(), Self::Error> {
//!         self.total = update.total;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = DocumentActor::<Tally>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(TallyCreate).await.unwrap();
//!     let read = client.get(id).await.unwrap().unwrap();
//!
//!     // First writer wins.
//!     let update = TallyUpdate { total: read.data.total + 4 };
//!     client.commit(id, read.version, update, vec![4]).await.unwrap();
//!
//!     // A second writer still holding the old version is rejected.
//!     let stale = TallyUpdate { total: read.data.total + 2 };
//!     let err = client.commit(id, read.version, stale, vec![2]).await.unwrap_err();
//!     assert!(matches!(err, StoreError::Conflict { expected: 1, actual: 2, .. }));
//!
//!     assert_eq!(client.get(id).await.unwrap().unwrap().data.total, 4);
//!     assert_eq!(client.records(id).await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task
//! - Messages are processed **sequentially** within a store (no locks needed)
//! - Writers never block each other; they race, and the loser retries
//! - Every committed write is broadcast as a [`ChangeEvent`] to subscribers
//!
//! ## Testing
//!
//! [`mock::MockStore`] answers a real `DocumentClient` from scripted expectations, which
//! makes it easy to inject a `Conflict` at an exact point of a retry loop.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod versioned;

pub use actor::DocumentActor;
pub use client::DocumentClient;
pub use client_trait::TypedClient;
pub use entity::DocumentEntity;
pub use error::StoreError;
pub use message::{DocumentRequest, Response};
pub use versioned::{ChangeEvent, CommitReceipt, RecordId, StoredRecord, Versioned};
