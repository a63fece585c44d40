//! OpenAPI document served by Swagger UI in debug builds.

use utoipa::OpenApi;

/// Aggregated API description for every REST endpoint.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::organizations::create_organization,
        crate::inbound::http::organizations::list_organizations,
        crate::inbound::http::organizations::get_organization,
        crate::inbound::http::organizations::add_member,
        crate::inbound::http::organizations::update_member_access_level,
        crate::inbound::http::organizations::remove_member,
    ),
    components(schemas(
        crate::inbound::http::ErrorResponse,
        crate::inbound::http::schemas::CreateUserRequest,
        crate::inbound::http::schemas::CreateOrganizationRequest,
        crate::inbound::http::schemas::AddMemberRequest,
        crate::inbound::http::schemas::UpdateMemberRequest,
        crate::inbound::http::schemas::RemoveMemberRequest,
        crate::inbound::http::schemas::UserResponse,
        crate::inbound::http::schemas::UsersListResponse,
        crate::inbound::http::schemas::MemberPermissionResponse,
        crate::inbound::http::schemas::OrganizationResponse,
        crate::inbound::http::schemas::OrganizationsListResponse,
    )),
    tags(
        (name = "users", description = "User signup and lookup"),
        (name = "organizations", description = "Organization membership and queries"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
