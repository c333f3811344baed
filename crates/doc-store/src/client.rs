//! # Document Client
//!
//! The cloneable handle used to talk to a `DocumentActor`.

use crate::entity::DocumentEntity;
use crate::error::StoreError;
use crate::message::DocumentRequest;
use crate::versioned::{ChangeEvent, CommitReceipt, StoredRecord, Versioned};
use tokio::sync::{broadcast, mpsc, oneshot};

/// A type-safe client for a `DocumentActor<T>`.
///
/// Every call sends one request over the actor's mpsc channel and awaits the answer on a
/// oneshot channel. Cloning only clones the senders. Once a request has been sent,
/// dropping the call's future does not cancel it; the actor still applies it.
pub struct DocumentClient<T: DocumentEntity> {
    sender: mpsc::Sender<DocumentRequest<T>>,
    changes: broadcast::Sender<ChangeEvent<T>>,
}

impl<T: DocumentEntity> Clone for DocumentClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            changes: self.changes.clone(),
        }
    }
}

impl<T: DocumentEntity> DocumentClient<T> {
    pub fn new(
        sender: mpsc::Sender<DocumentRequest<T>>,
        changes: broadcast::Sender<ChangeEvent<T>>,
    ) -> Self {
        Self { sender, changes }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> DocumentRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, StoreError> {
        self.request(|respond_to| DocumentRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, StoreError> {
        self.request(|respond_to| DocumentRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<Versioned<T>>, StoreError> {
        self.request(|respond_to| DocumentRequest::List { respond_to })
            .await
    }

    /// Unconditional write. Prefer [`commit`](Self::commit) for read-modify-write.
    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<Versioned<T>, StoreError> {
        self.request(|respond_to| DocumentRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    /// Optimistic transaction: applies `update` and appends `records` only if the document
    /// is still at `expected_version`. Fails with [`StoreError::Conflict`] otherwise, in
    /// which case nothing was written.
    pub async fn commit(
        &self,
        id: T::Id,
        expected_version: u64,
        update: T::Update,
        records: Vec<T::Record>,
    ) -> Result<CommitReceipt<T>, StoreError> {
        self.request(|respond_to| DocumentRequest::Commit {
            id,
            expected_version,
            update,
            records,
            respond_to,
        })
        .await
    }

    /// The record log of one document, newest first.
    pub async fn records(&self, id: T::Id) -> Result<Vec<StoredRecord<T::Record>>, StoreError> {
        self.request(|respond_to| DocumentRequest::Records { id, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| DocumentRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| DocumentRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Subscribes to every write committed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent<T>> {
        self.changes.subscribe()
    }
}
