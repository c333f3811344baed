//! # Store Messages
//!
//! Requests sent from a `DocumentClient` to its `DocumentActor`.

use crate::entity::DocumentEntity;
use crate::error::StoreError;
use crate::versioned::{CommitReceipt, StoredRecord, Versioned};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the actor.
///
/// Besides the CRUD verbs and custom `Action`s, the store understands one transactional
/// verb, `Commit`: a write that is applied only if the document is still at
/// `expected_version`, together with any records to append beneath it. Because the actor
/// handles one message at a time, the version check, the document write and the record
/// append are observed by every other request as a single step.
#[derive(Debug)]
pub enum DocumentRequest<T: DocumentEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<Versioned<T>>>,
    },
    List {
        respond_to: Response<Vec<Versioned<T>>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<Versioned<T>>,
    },
    Commit {
        id: T::Id,
        expected_version: u64,
        update: T::Update,
        records: Vec<T::Record>,
        respond_to: Response<CommitReceipt<T>>,
    },
    Records {
        id: T::Id,
        respond_to: Response<Vec<StoredRecord<T::Record>>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
