//! # TypedClient Trait
//!
//! Common read/delete operations for domain-specific clients built on a `DocumentClient`.

use crate::{DocumentClient, DocumentEntity, StoreError, Versioned};
use async_trait::async_trait;

/// Trait for domain clients to inherit the generic reads.
///
/// Implementors provide access to the inner `DocumentClient` and a mapping from
/// [`StoreError`] into their own error type; `get`, `list` and `delete` come for free.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl TypedClient<Note> for NoteClient {
///     type Error = NoteError;
///
///     fn inner(&self) -> &DocumentClient<Note> {
///         &self.inner
///     }
///
///     fn map_error(e: StoreError) -> Self::Error {
///         NoteError::Store(e.to_string())
///     }
/// }
///
/// let snapshot = note_client.get(id).await?;
/// ```
#[async_trait]
pub trait TypedClient<T: DocumentEntity>: Send + Sync {
    /// The domain error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &DocumentClient<T>;

    /// Map store errors to the domain error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a document snapshot by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every document, ordered by id.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Versioned<T>>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete a document and its records.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
