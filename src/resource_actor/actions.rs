//! Custom actions for the Resource actor.
//!
//! Operations on a [`Resource`](crate::model::Resource) beyond plain writes. They are
//! handled by [`DocumentEntity::handle_action`](doc_store::DocumentEntity::handle_action).

/// Custom actions for Resource documents.
#[derive(Debug, Clone)]
pub enum ResourceAction {
    /// Adds one to the download counter.
    IncrementDownloads,
}

/// Results from ResourceActions - variants match 1:1 with ResourceAction
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceActionResult {
    /// The download count after the increment.
    IncrementDownloads(u64),
}
