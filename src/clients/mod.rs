//! Type-safe wrappers around [`DocumentClient`](doc_store::DocumentClient).

pub mod resource_client;

pub use resource_client::*;
