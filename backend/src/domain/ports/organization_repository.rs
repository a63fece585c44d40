//! Driven port for organization persistence adapters.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use thiserror::Error;

use crate::domain::{AccessLevel, DomainError, EntityId, MemberPermission, Organization};

/// Persistence errors raised by organization repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrganizationPersistenceError {
    /// The store could not be reached.
    #[error("organization store connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("organization store query failed: {message}")]
    Query { message: String },
    /// The store's unique name index rejected the write.
    #[error("an organization with this name already exists")]
    DuplicateName,
}

impl OrganizationPersistenceError {
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

impl From<OrganizationPersistenceError> for DomainError {
    fn from(value: OrganizationPersistenceError) -> Self {
        match value {
            OrganizationPersistenceError::DuplicateName => Self::DuplicateOrganization,
            other => Self::store(other.to_string()),
        }
    }
}

/// Store operations the organization aggregate needs.
///
/// The three member mutations are conditional updates: they report whether a
/// matching document was modified so the engine can distinguish a lost race
/// from success without a second read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Persist a new organization. The store's unique name index is the only
    /// duplicate guard.
    async fn insert(&self, organization: &Organization)
    -> Result<(), OrganizationPersistenceError>;

    /// Fetch an organization by identifier.
    async fn find_by_id(
        &self,
        id: &EntityId,
    ) -> Result<Option<Organization>, OrganizationPersistenceError>;

    /// Fetch an organization by exact name match.
    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, OrganizationPersistenceError>;

    /// Count and fetch one window of organizations. `name_filter` is a
    /// case-insensitive substring match against the name.
    async fn list(
        &self,
        name_filter: Option<String>,
        page: PageRequest,
    ) -> Result<Page<Organization>, OrganizationPersistenceError>;

    /// Append a member entry unless one already exists for the same user.
    /// Returns whether the entry was appended.
    async fn insert_member(
        &self,
        organization_id: &EntityId,
        member: &MemberPermission,
    ) -> Result<bool, OrganizationPersistenceError>;

    /// Set the access level on an existing member entry. Returns whether a
    /// matching entry was found.
    async fn set_member_access(
        &self,
        organization_id: &EntityId,
        user_id: &EntityId,
        access_level: AccessLevel,
    ) -> Result<bool, OrganizationPersistenceError>;

    /// Remove the member entry for a user. Returns whether a matching entry
    /// was found.
    async fn remove_member(
        &self,
        organization_id: &EntityId,
        user_id: &EntityId,
    ) -> Result<bool, OrganizationPersistenceError>;
}
