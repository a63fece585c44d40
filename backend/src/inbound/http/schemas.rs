//! Request and response models for the HTTP surface.
//!
//! Responses are explicit projections of the domain entities: one canonical
//! entity struct in the domain, one view struct per wire shape here. All
//! identifiers serialize as strings.

use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{MemberPermission, Organization, User};

/// Body for `POST /users/`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Display name of the new user.
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Unique email address of the new user.
    #[schema(example = "jdoe@example.com")]
    pub email: String,
}

/// Body for `POST /organizations/`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateOrganizationRequest {
    /// Unique organization name.
    #[schema(example = "Acme")]
    pub name: String,
    /// Identifier of the creating user.
    #[schema(example = "5f9f1b9b9c9d1b1b8c8c8c8c")]
    pub created_by: String,
}

/// Body for `POST /organizations/{orgId}/members/{authorId}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AddMemberRequest {
    /// User to enroll.
    pub user_id: String,
    /// Access level literal for the new member.
    #[schema(example = "WRITE")]
    pub access_level: String,
}

/// Body for `PATCH /organizations/{orgId}/members/{authorId}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateMemberRequest {
    /// Member whose access level changes.
    pub user_id: String,
    /// New access level literal.
    #[schema(example = "ADMIN")]
    pub access_level: String,
}

/// Body for `DELETE /organizations/{orgId}/members/{authorId}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RemoveMemberRequest {
    /// Member to remove.
    pub user_id: String,
}

/// Query parameters shared by the two listing endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Case-insensitive substring filter on the name.
    pub name: Option<String>,
    /// Window size; defaults to 10.
    pub limit: Option<u32>,
    /// Rows skipped before the window; defaults to 0.
    pub offset: Option<u64>,
}

/// Wire projection of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Stable user identifier.
    #[schema(example = "5f9f1b9b9c9d1b1b8c8c8c8c")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Identifiers of the organizations the user belongs to.
    pub organizations: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            organizations: user
                .organizations()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Envelope for `GET /users/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsersListResponse {
    /// Size of the full filtered set, independent of the window.
    pub total_count: u64,
    /// Users inside the requested window.
    pub users: Vec<UserResponse>,
}

impl From<Page<User>> for UsersListResponse {
    fn from(page: Page<User>) -> Self {
        let page = page.map(UserResponse::from);
        Self {
            total_count: page.total_count,
            users: page.items,
        }
    }
}

/// Wire projection of a [`MemberPermission`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberPermissionResponse {
    /// Member's user identifier.
    pub user_id: String,
    /// Member's access level literal.
    #[schema(example = "ADMIN")]
    pub access_level: String,
}

impl From<&MemberPermission> for MemberPermissionResponse {
    fn from(member: &MemberPermission) -> Self {
        Self {
            user_id: member.user_id().to_string(),
            access_level: member.access_level().as_str().to_owned(),
        }
    }
}

/// Wire projection of an [`Organization`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrganizationResponse {
    /// Stable organization identifier.
    #[schema(example = "5f9f1b9b9c9d1b1b8c8c8c8c")]
    pub id: String,
    /// Unique organization name.
    pub name: String,
    /// Identifier of the creating user.
    pub created_by: String,
    /// Current member list.
    pub members: Vec<MemberPermissionResponse>,
}

impl From<Organization> for OrganizationResponse {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.id().to_string(),
            name: organization.name().as_ref().to_owned(),
            created_by: organization.created_by().to_string(),
            members: organization
                .members()
                .iter()
                .map(MemberPermissionResponse::from)
                .collect(),
        }
    }
}

/// Envelope for `GET /organizations/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationsListResponse {
    /// Size of the full filtered set, independent of the window.
    pub total_count: u64,
    /// Organizations inside the requested window.
    pub organizations: Vec<OrganizationResponse>,
}

impl From<Page<Organization>> for OrganizationsListResponse {
    fn from(page: Page<Organization>) -> Self {
        let page = page.map(OrganizationResponse::from);
        Self {
            total_count: page.total_count,
            organizations: page.items,
        }
    }
}
