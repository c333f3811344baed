//! Runtime orchestration and lifecycle management.
//!
//! - [`ReviewPlatform`] starts the store, wires the services to it and shuts it down
//! - [`setup_tracing`] initializes logging

pub mod platform;
pub mod tracing;

pub use self::platform::*;
pub use self::tracing::*;
