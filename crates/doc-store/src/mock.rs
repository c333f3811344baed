//! # Mock Store & Testing Guide
//!
//! `MockStore<T>` hands out a real [`DocumentClient<T>`] whose requests are answered from a
//! queue of scripted expectations instead of a running actor. Code that takes a
//! `DocumentClient` can therefore be tested deterministically, including failures that are
//! hard to provoke against a live store (version conflicts at a precise moment, a closed
//! actor, a document that vanishes between read and commit).
//!
//! ## When to use Mocks vs a Real Actor
//!
//! | Feature | MockStore | DocumentActor |
//! |---------|-----------|---------------|
//! | **Determinism** | Fully scripted | Subject to the scheduler |
//! | **State** | None (expectations only) | Real documents and versions |
//! | **Error injection** | `return_err(...)` | Requires racing writers |
//! | **Use case** | Logic *around* the client | The store itself, end-to-end flows |
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut mock = MockStore::<Note>::new();
//! mock.expect_get(NoteId(1)).return_ok(Some(Versioned::new(3, note.clone())));
//! mock.expect_commit(NoteId(1)).return_err(StoreError::Conflict {
//!     id: "note_1".into(),
//!     expected: 3,
//!     actual: 4,
//! });
//!
//! let client = mock.client();
//! // exercise code that uses `client` ...
//! mock.verify();
//! ```
//!
//! Expectations are consumed in order. A request that does not match the next expectation
//! (wrong verb or wrong id) panics the mock task, which the caller observes as
//! [`StoreError::ActorDropped`]; `verify()` then reports the leftover expectations.
//!
//! For step-by-step control use [`create_mock_client`] and answer each request by hand
//! with [`expect_get`] / [`expect_commit`].

use crate::client::DocumentClient;
use crate::entity::DocumentEntity;
use crate::error::StoreError;
use crate::message::DocumentRequest;
use crate::versioned::{CommitReceipt, StoredRecord, Versioned};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer for the next request.
enum Expectation<T: DocumentEntity> {
    Create {
        response: Result<T::Id, StoreError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<Versioned<T>>, StoreError>,
    },
    List {
        response: Result<Vec<Versioned<T>>, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<Versioned<T>, StoreError>,
    },
    Commit {
        id: T::Id,
        response: Result<CommitReceipt<T>, StoreError>,
    },
    Records {
        id: T::Id,
        response: Result<Vec<StoredRecord<T::Record>>, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock store with expectation tracking.
pub struct MockStore<T: DocumentEntity> {
    client: DocumentClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: DocumentEntity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DocumentEntity> MockStore<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (client, mut receiver) = create_mock_client::<T>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();
                answer(request, expectation);
            }
        });

        Self {
            client,
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> DocumentClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<Versioned<T>>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<Versioned<T>>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, Versioned<T>> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_commit(&mut self, id: T::Id) -> ExpectationBuilder<T, CommitReceipt<T>> {
        self.builder(move |response| Expectation::Commit { id, response })
    }

    pub fn expect_records(
        &mut self,
        id: T::Id,
    ) -> ExpectationBuilder<T, Vec<StoredRecord<T::Record>>> {
        self.builder(move |response| Expectation::Records { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Panics unless every expectation has been consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

/// Completes an expectation with the response the mock should give.
pub struct ExpectationBuilder<T: DocumentEntity, R> {
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: DocumentEntity, R> ExpectationBuilder<T, R> {
    /// Answer the request successfully.
    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Answer the request with an error.
    pub fn return_err(self, error: StoreError) {
        let expectation = (self.make)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

fn check_id<I: PartialEq + std::fmt::Debug>(verb: &str, expected: &I, actual: &I) {
    if expected != actual {
        panic!("{verb} expected for {expected:?}, got request for {actual:?}");
    }
}

fn answer<T: DocumentEntity>(request: DocumentRequest<T>, expectation: Option<Expectation<T>>) {
    match (request, expectation) {
        (DocumentRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
        }
        (DocumentRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            check_id("Get", &want, &id);
            let _ = respond_to.send(response);
        }
        (DocumentRequest::List { respond_to }, Some(Expectation::List { response })) => {
            let _ = respond_to.send(response);
        }
        (
            DocumentRequest::Update { id, respond_to, .. },
            Some(Expectation::Update { id: want, response }),
        ) => {
            check_id("Update", &want, &id);
            let _ = respond_to.send(response);
        }
        (
            DocumentRequest::Commit { id, respond_to, .. },
            Some(Expectation::Commit { id: want, response }),
        ) => {
            check_id("Commit", &want, &id);
            let _ = respond_to.send(response);
        }
        (
            DocumentRequest::Records { id, respond_to },
            Some(Expectation::Records { id: want, response }),
        ) => {
            check_id("Records", &want, &id);
            let _ = respond_to.send(response);
        }
        (
            DocumentRequest::Delete { id, respond_to },
            Some(Expectation::Delete { id: want, response }),
        ) => {
            check_id("Delete", &want, &id);
            let _ = respond_to.send(response);
        }
        (
            DocumentRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => {
            check_id("Action", &want, &id);
            let _ = respond_to.send(response);
        }
        (_, None) => panic!("Unexpected request: no expectations left"),
        _ => panic!("Unexpected request or expectation mismatch"),
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Use this when a test needs to decide *when* each request is answered, e.g. to let a
/// second writer commit between a first writer's read and its commit.
pub fn create_mock_client<T: DocumentEntity>(
    buffer_size: usize,
) -> (DocumentClient<T>, mpsc::Receiver<DocumentRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (changes, _) = broadcast::channel(16);
    (DocumentClient::new(sender, changes), receiver)
}

/// Waits for the next request and returns it if it is a Get.
pub async fn expect_get<T: DocumentEntity>(
    receiver: &mut mpsc::Receiver<DocumentRequest<T>>,
) -> Option<(
    T::Id,
    oneshot::Sender<Result<Option<Versioned<T>>, StoreError>>,
)> {
    match receiver.recv().await {
        Some(DocumentRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// A Commit request taken off the channel.
pub struct PendingCommit<T: DocumentEntity> {
    pub id: T::Id,
    pub expected_version: u64,
    pub update: T::Update,
    pub records: Vec<T::Record>,
    pub respond_to: oneshot::Sender<Result<CommitReceipt<T>, StoreError>>,
}

/// Waits for the next request and returns it if it is a Commit.
pub async fn expect_commit<T: DocumentEntity>(
    receiver: &mut mpsc::Receiver<DocumentRequest<T>>,
) -> Option<PendingCommit<T>> {
    match receiver.recv().await {
        Some(DocumentRequest::Commit {
            id,
            expected_version,
            update,
            records,
            respond_to,
        }) => Some(PendingCommit {
            id,
            expected_version,
            update,
            records,
            respond_to,
        }),
        _ => None,
    }
}
