//! Domain-level failure taxonomy.
//!
//! These errors are transport agnostic. The HTTP adapter maps each variant
//! one-to-one onto a status code and wire payload; nothing in this module
//! knows about status codes.

use thiserror::Error;

/// Failure raised by the membership engine and the query layer.
///
/// Every fallible domain operation returns exactly one of these variants;
/// callers are forced to handle the invalid cases explicitly rather than
/// checking a nullable result downstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DomainError {
    /// A required input is missing or empty.
    #[error("{0}")]
    Validation(String),
    /// An input did not parse as a store identifier. Carries the offending
    /// field name; distinct from a lookup miss.
    #[error("{0} is not a valid identifier")]
    InvalidIdentifier(String),
    /// An access level literal outside {READ, WRITE, ADMIN}. Carries the
    /// rejected value.
    #[error("{0:?} is not a valid access level")]
    InvalidAccessLevel(String),
    /// No user matches the given identifier or email.
    #[error("user not found")]
    UserNotFound,
    /// No organization matches the given identifier or name.
    #[error("organization not found")]
    OrganizationNotFound,
    /// The target user is not a member of the organization.
    #[error("member not found")]
    MemberNotFound,
    /// The author is not an ADMIN member of the organization.
    #[error("author is not an admin of the organization")]
    NotAuthorized,
    /// The target user is already a member of the organization.
    #[error("user is already a member of the organization")]
    AlreadyMember,
    /// The organization creator is permanently protected from removal.
    #[error("the organization creator cannot be removed")]
    CannotRemoveCreator,
    /// A user with the same email already exists.
    #[error("user already exists")]
    DuplicateUser,
    /// An organization with the same name already exists.
    #[error("organization already exists")]
    DuplicateOrganization,
    /// The document store failed or is unreachable.
    #[error("store failure: {0}")]
    Store(String),
}

impl DomainError {
    /// Convenience constructor for [`DomainError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Convenience constructor for [`DomainError::Store`].
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Stable machine-readable code identifying the failure category.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::InvalidIdentifier(_) => "invalid_identifier",
            Self::InvalidAccessLevel(_) => "invalid_access_level",
            Self::UserNotFound => "user_not_found",
            Self::OrganizationNotFound => "organization_not_found",
            Self::MemberNotFound => "member_not_found",
            Self::NotAuthorized => "not_authorized",
            Self::AlreadyMember => "already_member",
            Self::CannotRemoveCreator => "cannot_remove_creator",
            Self::DuplicateUser => "duplicate_user",
            Self::DuplicateOrganization => "duplicate_organization",
            Self::Store(_) => "store_error",
        }
    }
}

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_snake_case() {
        let cases = [
            (DomainError::validation("name is required"), "validation_error"),
            (
                DomainError::InvalidIdentifier("user_id".into()),
                "invalid_identifier",
            ),
            (
                DomainError::InvalidAccessLevel("OWNER".into()),
                "invalid_access_level",
            ),
            (DomainError::UserNotFound, "user_not_found"),
            (DomainError::OrganizationNotFound, "organization_not_found"),
            (DomainError::MemberNotFound, "member_not_found"),
            (DomainError::NotAuthorized, "not_authorized"),
            (DomainError::AlreadyMember, "already_member"),
            (DomainError::CannotRemoveCreator, "cannot_remove_creator"),
            (DomainError::DuplicateUser, "duplicate_user"),
            (DomainError::DuplicateOrganization, "duplicate_organization"),
            (DomainError::store("boom"), "store_error"),
        ];
        for (error, code) in cases {
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn messages_name_the_offending_field() {
        let error = DomainError::InvalidIdentifier("author_id".into());
        assert_eq!(error.to_string(), "author_id is not a valid identifier");
    }
}
