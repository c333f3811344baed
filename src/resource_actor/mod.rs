//! Resource-specific document logic: validation, the review aggregate guard and the
//! download counter.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ResourceClient;
use crate::model::Resource;
use doc_store::DocumentActor;

/// Creates a new Resource actor and its client.
pub fn new(buffer_size: usize) -> (DocumentActor<Resource>, ResourceClient) {
    let (actor, generic_client) = DocumentActor::new(buffer_size);
    let client = ResourceClient::new(generic_client);

    (actor, client)
}
