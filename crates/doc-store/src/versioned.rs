//! # Versioned Snapshots & Records
//!
//! Value types handed out by the store: document snapshots tagged with their version,
//! stored sub-collection records, commit receipts and change events.

use chrono::{DateTime, Utc};
use std::fmt::Display;

use crate::entity::DocumentEntity;

/// A document snapshot together with the version it was read at.
///
/// The version starts at 1 on create and grows by one on every successful write. It is the
/// token an optimistic [`commit`](crate::DocumentClient::commit) is conditioned on.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub version: u64,
    pub data: T,
}

impl<T> Versioned<T> {
    pub fn new(version: u64, data: T) -> Self {
        Self { version, data }
    }
}

/// Store-generated key of an appended record.
///
/// Keys come from a single counter per actor, so they also order records by commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub u64);

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rec_{}", self.0)
    }
}

/// A committed, immutable record.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord<R> {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub data: R,
}

/// What a successful commit wrote.
#[derive(Debug, Clone)]
pub struct CommitReceipt<T: DocumentEntity> {
    /// The document as stored after the commit.
    pub document: Versioned<T>,
    /// Keys of the appended records, in the order they were supplied.
    pub records: Vec<RecordId>,
}

/// Notification broadcast after every committed write.
#[derive(Debug, Clone)]
pub enum ChangeEvent<T: DocumentEntity> {
    Created { id: T::Id, document: Versioned<T> },
    Updated { id: T::Id, document: Versioned<T> },
    Deleted { id: T::Id },
}

impl<T: DocumentEntity> ChangeEvent<T> {
    /// Id of the document this event is about.
    pub fn id(&self) -> &T::Id {
        match self {
            ChangeEvent::Created { id, .. }
            | ChangeEvent::Updated { id, .. }
            | ChangeEvent::Deleted { id } => id,
        }
    }

    /// The document as stored after the write, unless it was deleted.
    pub fn document(&self) -> Option<&Versioned<T>> {
        match self {
            ChangeEvent::Created { document, .. } | ChangeEvent::Updated { document, .. } => {
                Some(document)
            }
            ChangeEvent::Deleted { .. } => None,
        }
    }
}
