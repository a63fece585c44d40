//! Organization aggregate and member permissions.

use std::fmt;

use crate::domain::{AccessLevel, EntityId};

/// Validation errors raised while constructing organization components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizationValidationError {
    EmptyName,
}

impl fmt::Display for OrganizationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for OrganizationValidationError {}

/// Name of an organization, unique across the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationName(String);

impl OrganizationName {
    /// Validate and construct an [`OrganizationName`].
    pub fn new(name: impl Into<String>) -> Result<Self, OrganizationValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OrganizationValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for OrganizationName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OrganizationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// One member's standing within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberPermission {
    user_id: EntityId,
    access_level: AccessLevel,
}

impl MemberPermission {
    /// Pair a user with an access level.
    #[must_use]
    pub fn new(user_id: EntityId, access_level: AccessLevel) -> Self {
        Self {
            user_id,
            access_level,
        }
    }

    /// Member's user identifier.
    #[must_use]
    pub fn user_id(&self) -> EntityId {
        self.user_id
    }

    /// Member's access level.
    #[must_use]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }
}

/// Organization aggregate.
///
/// ## Invariants
/// - `members` holds at most one entry per user; enforced by the engine's
///   existence check plus a conditional store update, not a store index.
/// - `created_by` is enrolled as ADMIN at creation and can never be removed,
///   though the creator's access level may later change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    id: EntityId,
    name: OrganizationName,
    created_by: EntityId,
    members: Vec<MemberPermission>,
}

impl Organization {
    /// Build a new organization with its creator auto-enrolled as ADMIN.
    pub fn new(id: EntityId, name: OrganizationName, created_by: EntityId) -> Self {
        Self {
            id,
            name,
            created_by,
            members: vec![MemberPermission::new(created_by, AccessLevel::Admin)],
        }
    }

    /// Reassemble an organization from persisted parts.
    pub fn from_parts(
        id: EntityId,
        name: OrganizationName,
        created_by: EntityId,
        members: Vec<MemberPermission>,
    ) -> Self {
        Self {
            id,
            name,
            created_by,
            members,
        }
    }

    /// Stable organization identifier.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Unique organization name.
    #[must_use]
    pub fn name(&self) -> &OrganizationName {
        &self.name
    }

    /// Identifier of the creating user.
    #[must_use]
    pub fn created_by(&self) -> EntityId {
        self.created_by
    }

    /// Current member list in enrollment order.
    #[must_use]
    pub fn members(&self) -> &[MemberPermission] {
        &self.members
    }

    /// Look up the membership entry for a user, if any.
    #[must_use]
    pub fn member_for(&self, user_id: EntityId) -> Option<&MemberPermission> {
        self.members.iter().find(|m| m.user_id() == user_id)
    }

    /// Whether the user holds any membership entry.
    #[must_use]
    pub fn is_member(&self, user_id: EntityId) -> bool {
        self.member_for(user_id).is_some()
    }

    /// Whether the user is a member with ADMIN access. This is the single
    /// authorization rule for every membership mutation.
    #[must_use]
    pub fn is_admin(&self, user_id: EntityId) -> bool {
        self.member_for(user_id)
            .is_some_and(|m| m.access_level() == AccessLevel::Admin)
    }
}
