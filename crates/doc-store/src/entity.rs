//! # DocumentEntity Trait
//!
//! The `DocumentEntity` trait is the contract every document type must satisfy to be
//! stored by the generic [`DocumentActor`](crate::DocumentActor). It names the id, the
//! create/update DTOs, the custom actions, the append-only record type kept beneath each
//! document, the injected context and the error type, and provides the lifecycle hooks
//! (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Hooks run on a copy
//! The actor always invokes mutating hooks on a clone of the stored document and swaps the
//! clone in only when the hook returns `Ok`. A hook may therefore bail out halfway through
//! without leaving a partially written document behind.
//!
//! # Provided Methods (Hooks)
//! - [`DocumentEntity::on_create`]
//! - [`DocumentEntity::on_delete`]
//!
//! The defaults do nothing (`Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any document type must implement to be managed by `DocumentActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can await other clients. The `Context` type is
/// injected into every hook when the actor starts (`run(context)`), not when it is built.
#[async_trait]
pub trait DocumentEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this document.
    /// Must be convertible from u32 for automatic id generation, and ordered so that
    /// listings are stable.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new document.
    type Create: Send + Sync + Debug;

    /// The data required to write an existing document.
    type Update: Send + Sync + Debug;

    /// Enum representing document-specific operations (e.g. incrementing a counter).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Append-only record stored beneath each document (a sub-collection).
    /// Records are written only through [`commit`](crate::DocumentClient::commit) and never
    /// mutated afterwards.
    type Record: Clone + Send + Sync + Debug + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this document.
    ///
    /// Errors cross the actor boundary boxed inside
    /// [`StoreError::EntityError`](crate::StoreError::EntityError); typed clients downcast
    /// them back to this type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full document from the generated id and the create payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the document is built and before it becomes visible.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for both unconditional updates and optimistic commits.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the document and its records are removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom document-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
