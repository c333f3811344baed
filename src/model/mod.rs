//! Pure data structures (DTOs), including the [`DocumentEntity`](doc_store::DocumentEntity)
//! document type [`Resource`].

pub mod rating;
pub mod resource;
pub mod review;
pub mod stars;

pub use rating::*;
pub use resource::*;
pub use review::*;
pub use stars::*;
