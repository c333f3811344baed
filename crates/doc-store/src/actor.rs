//! # Document Actor
//!
//! `DocumentActor<T>` is the server half of the store. It owns every document of one type,
//! their version counters and their append-only record logs, and processes requests one at
//! a time.

use crate::client::DocumentClient;
use crate::entity::DocumentEntity;
use crate::error::StoreError;
use crate::message::DocumentRequest;
use crate::versioned::{ChangeEvent, CommitReceipt, RecordId, StoredRecord, Versioned};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Capacity of the change-event broadcast. Slow subscribers observe `Lagged` instead of
/// blocking writers.
const CHANGE_CAPACITY: usize = 256;

/// The generic actor that stores documents of type `T`.
///
/// **Concurrency model**: requests are handled sequentially inside one Tokio task, so the
/// store needs no locks. A `Commit` compares the caller's version with the stored one and
/// writes in the same step, which makes it a compare-and-swap from every client's point of
/// view. Two clients that read the same version can never both commit against it.
///
/// # Usage Pattern
///
/// 1. **Create**: `DocumentActor::new()` returns the actor and a cloneable client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop.
///
/// # Operations
///
/// * **Create** - generate an id, build the document, run `on_create`, store at version 1.
/// * **Get / List** - clone snapshots out of the store.
/// * **Update** - run `on_update` on a copy, store it, bump the version.
/// * **Commit** - like Update, but only if the version still equals `expected_version`;
///   records are appended in the same step.
/// * **Action** - run `handle_action` on a copy, store it, bump the version.
/// * **Records** - the record log of one document, newest first.
/// * **Delete** - run `on_delete`, drop the document and its records.
pub struct DocumentActor<T: DocumentEntity> {
    receiver: mpsc::Receiver<DocumentRequest<T>>,
    store: BTreeMap<T::Id, Versioned<T>>,
    records: HashMap<T::Id, Vec<StoredRecord<T::Record>>>,
    changes: broadcast::Sender<ChangeEvent<T>>,
    next_id: u32,
    next_record: u64,
}

impl<T: DocumentEntity> DocumentActor<T> {
    /// Creates a new `DocumentActor` and its associated `DocumentClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, DocumentClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            records: HashMap::new(),
            changes: changes.clone(),
            next_id: 1,
            next_record: 1,
        };
        let client = DocumentClient::new(sender, changes);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                DocumentRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    let document = Versioned::new(1, item);
                    self.store.insert(id.clone(), document.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    self.publish(ChangeEvent::Created {
                        id: id.clone(),
                        document,
                    });
                    let _ = respond_to.send(Ok(id));
                }
                DocumentRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                DocumentRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                DocumentRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut next = current.data.clone();
                    if let Err(e) = next.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    let document = self.replace(&id, next);
                    info!(entity_type, %id, version = document.version, "Updated");
                    let _ = respond_to.send(Ok(document));
                }
                DocumentRequest::Commit {
                    id,
                    expected_version,
                    update,
                    records,
                    respond_to,
                } => {
                    debug!(entity_type, %id, expected_version, ?update, records = records.len(), "Commit");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if current.version != expected_version {
                        info!(
                            entity_type,
                            %id,
                            expected_version,
                            actual_version = current.version,
                            "Commit conflict"
                        );
                        let _ = respond_to.send(Err(StoreError::Conflict {
                            id: id.to_string(),
                            expected: expected_version,
                            actual: current.version,
                        }));
                        continue;
                    }
                    let mut next = current.data.clone();
                    if let Err(e) = next.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Commit rejected");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    let appended = self.append(&id, records);
                    let document = self.replace(&id, next);
                    info!(
                        entity_type,
                        %id,
                        version = document.version,
                        records = appended.len(),
                        "Committed"
                    );
                    let _ = respond_to.send(Ok(CommitReceipt {
                        document,
                        records: appended,
                    }));
                }
                DocumentRequest::Records { id, respond_to } => {
                    if !self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    }
                    let mut log = self.records.get(&id).cloned().unwrap_or_default();
                    log.reverse();
                    debug!(entity_type, %id, count = log.len(), "Records");
                    let _ = respond_to.send(Ok(log));
                }
                DocumentRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = current.data.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    self.records.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    self.publish(ChangeEvent::Deleted { id });
                    let _ = respond_to.send(Ok(()));
                }
                DocumentRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut next = current.data.clone();
                    match next.handle_action(action, &context).await {
                        Ok(result) => {
                            let document = self.replace(&id, next);
                            info!(entity_type, %id, version = document.version, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Stores `data` as the next version of an existing document and announces it.
    fn replace(&mut self, id: &T::Id, data: T) -> Versioned<T> {
        let version = self.store.get(id).map_or(1, |doc| doc.version + 1);
        let document = Versioned::new(version, data);
        self.store.insert(id.clone(), document.clone());
        self.publish(ChangeEvent::Updated {
            id: id.clone(),
            document: document.clone(),
        });
        document
    }

    fn append(&mut self, id: &T::Id, records: Vec<T::Record>) -> Vec<RecordId> {
        let log = self.records.entry(id.clone()).or_default();
        let mut ids = Vec::with_capacity(records.len());
        for data in records {
            let record_id = RecordId(self.next_record);
            self.next_record += 1;
            log.push(StoredRecord {
                id: record_id,
                created_at: Utc::now(),
                data,
            });
            ids.push(record_id);
        }
        ids
    }

    fn publish(&self, event: ChangeEvent<T>) {
        // No subscribers is not an error.
        let _ = self.changes.send(event);
    }
}
