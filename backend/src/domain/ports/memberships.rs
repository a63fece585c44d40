//! Driving port for the membership engine and organization queries.
//!
//! Commands carry raw request strings; the engine owns the ordered
//! validation so failures surface in the documented precedence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{DomainResult, Organization};

/// Raw input for creating an organization.
#[derive(Debug, Clone)]
pub struct CreateOrganizationCommand {
    /// Organization name; must be non-empty and unique.
    pub name: String,
    /// Identifier of the creating user.
    pub created_by: String,
}

/// Raw input for enrolling a member.
#[derive(Debug, Clone)]
pub struct AddMemberCommand {
    /// Target organization identifier.
    pub organization_id: String,
    /// Acting user; must be an ADMIN member.
    pub author_id: String,
    /// User to enroll.
    pub user_id: String,
    /// Access level literal for the new member.
    pub access_level: String,
}

/// Raw input for changing a member's access level.
#[derive(Debug, Clone)]
pub struct UpdateMemberAccessCommand {
    /// Target organization identifier.
    pub organization_id: String,
    /// Acting user; must be an ADMIN member.
    pub author_id: String,
    /// Member whose access level changes.
    pub user_id: String,
    /// New access level literal.
    pub access_level: String,
}

/// Raw input for removing a member.
#[derive(Debug, Clone)]
pub struct RemoveMemberCommand {
    /// Target organization identifier.
    pub organization_id: String,
    /// Acting user; must be an ADMIN member.
    pub author_id: String,
    /// Member to remove; the creator is always rejected.
    pub user_id: String,
}

/// Use-case port for organization membership.
#[async_trait]
pub trait Memberships: Send + Sync {
    /// Create an organization with its creator enrolled as ADMIN, then
    /// append the organization to the creator's back-reference list.
    async fn create_organization(
        &self,
        command: CreateOrganizationCommand,
    ) -> DomainResult<Organization>;

    /// Fetch a single organization. Input that parses as a store identifier
    /// is looked up by id; anything else is treated as a name.
    async fn get_organization(&self, id_or_name: &str) -> DomainResult<Organization>;

    /// Count and fetch one window of organizations, optionally filtered by a
    /// case-insensitive name substring.
    async fn list_organizations(
        &self,
        name_filter: Option<String>,
        page: PageRequest,
    ) -> DomainResult<Page<Organization>>;

    /// Enroll a user, authorized by an ADMIN author.
    async fn add_member(&self, command: AddMemberCommand) -> DomainResult<Organization>;

    /// Change an existing member's access level, authorized by an ADMIN
    /// author.
    async fn update_member_access_level(
        &self,
        command: UpdateMemberAccessCommand,
    ) -> DomainResult<Organization>;

    /// Remove a member, authorized by an ADMIN author. The creator can never
    /// be removed.
    async fn remove_member(&self, command: RemoveMemberCommand) -> DomainResult<Organization>;
}
