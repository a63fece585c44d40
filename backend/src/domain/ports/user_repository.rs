//! Driven port for user persistence adapters.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use thiserror::Error;

use crate::domain::{DomainError, EntityId, User};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// The store could not be reached.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
    /// The store's unique email index rejected the write.
    #[error("a user with this email already exists")]
    DuplicateEmail,
}

impl UserPersistenceError {
    /// Connection failure with context.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query failure with context.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<UserPersistenceError> for DomainError {
    fn from(value: UserPersistenceError) -> Self {
        match value {
            UserPersistenceError::DuplicateEmail => Self::DuplicateUser,
            other => Self::store(other.to_string()),
        }
    }
}

/// Store operations the user aggregate needs.
///
/// Adapters translate between store documents and domain entities; no
/// business rule lives behind this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. The store's unique email index is the only
    /// duplicate guard.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Count and fetch one window of users. `name_filter` is a
    /// case-insensitive substring match against the name.
    async fn list(
        &self,
        name_filter: Option<String>,
        page: PageRequest,
    ) -> Result<Page<User>, UserPersistenceError>;

    /// Append an organization to the user's back-reference list.
    async fn add_organization(
        &self,
        user_id: &EntityId,
        organization_id: &EntityId,
    ) -> Result<(), UserPersistenceError>;

    /// Drop an organization from the user's back-reference list.
    async fn remove_organization(
        &self,
        user_id: &EntityId,
        organization_id: &EntityId,
    ) -> Result<(), UserPersistenceError>;
}
