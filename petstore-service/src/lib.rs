//! In-memory petstore business services.
//!
//! The gateway treats business logic as an external collaborator; this
//! crate is the default one, backing all three contract services with
//! in-memory maps. Suitable for development and tests; a persistent
//! implementation would replace it behind the same traits.

pub mod service;
pub mod store;

pub use store::Petstore;
