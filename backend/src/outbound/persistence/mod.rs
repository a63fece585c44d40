//! Document store persistence adapters.
//!
//! Concrete implementations of the domain repository ports backed by
//! MongoDB, plus in-memory equivalents for tests and store-less operation.
//! Adapters are thin: they translate between store documents and domain
//! entities and map driver errors onto the typed persistence errors. No
//! business rule lives here.

mod documents;
mod memory;
mod mongo_helpers;
mod mongo_organization_repository;
mod mongo_user_repository;
mod store;

pub use memory::{InMemoryOrganizationRepository, InMemoryUserRepository};
pub use mongo_organization_repository::MongoOrganizationRepository;
pub use mongo_user_repository::MongoUserRepository;
pub use store::DocumentStore;
