//! Organization and membership endpoints.
//!
//! Membership mutations carry the acting user in the path (`authorId`) and
//! the target user in the body; the engine authorizes the author against the
//! organization's member list.

use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::domain::ports::{
    AddMemberCommand, CreateOrganizationCommand, RemoveMemberCommand, UpdateMemberAccessCommand,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    AddMemberRequest, CreateOrganizationRequest, ListQuery, OrganizationResponse,
    OrganizationsListResponse, RemoveMemberRequest, UpdateMemberRequest,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::page_request;

/// Create an organization; the creator is enrolled as ADMIN.
#[utoipa::path(
    post,
    path = "/organizations",
    request_body = CreateOrganizationRequest,
    responses(
        (status = 201, description = "Organization created", body = OrganizationResponse),
        (status = 400, description = "Invalid input or duplicate name", body = crate::inbound::http::ErrorResponse),
        (status = 404, description = "Creator does not exist", body = crate::inbound::http::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::inbound::http::ErrorResponse)
    ),
    tags = ["organizations"],
    operation_id = "createOrganization"
)]
#[post("/organizations")]
pub async fn create_organization(
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrganizationRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let organization = state
        .memberships
        .create_organization(CreateOrganizationCommand {
            name: body.name,
            created_by: body.created_by,
        })
        .await?;
    Ok(HttpResponse::Created().json(OrganizationResponse::from(organization)))
}

/// List organizations with optional name filtering and pagination.
#[utoipa::path(
    get,
    path = "/organizations",
    params(ListQuery),
    responses(
        (status = 200, description = "One window of organizations", body = OrganizationsListResponse),
        (status = 400, description = "Invalid window parameters", body = crate::inbound::http::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::inbound::http::ErrorResponse)
    ),
    tags = ["organizations"],
    operation_id = "listOrganizations"
)]
#[get("/organizations")]
pub async fn list_organizations(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<OrganizationsListResponse>> {
    let query = query.into_inner();
    let page = page_request(&query)?;
    let organizations = state.memberships.list_organizations(query.name, page).await?;
    Ok(web::Json(OrganizationsListResponse::from(organizations)))
}

/// Fetch a single organization by identifier or name.
#[utoipa::path(
    get,
    path = "/organizations/{id_or_name}",
    params(("id_or_name" = String, Path, description = "Store identifier or organization name")),
    responses(
        (status = 200, description = "The matching organization", body = OrganizationResponse),
        (status = 404, description = "No matching organization", body = crate::inbound::http::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::inbound::http::ErrorResponse)
    ),
    tags = ["organizations"],
    operation_id = "getOrganization"
)]
#[get("/organizations/{id_or_name}")]
pub async fn get_organization(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrganizationResponse>> {
    let organization = state.memberships.get_organization(&path.into_inner()).await?;
    Ok(web::Json(OrganizationResponse::from(organization)))
}

/// Enroll a member, authorized by an ADMIN author.
#[utoipa::path(
    post,
    path = "/organizations/{organization_id}/members/{author_id}",
    params(
        ("organization_id" = String, Path, description = "Target organization identifier"),
        ("author_id" = String, Path, description = "Acting user; must be an ADMIN member")
    ),
    request_body = AddMemberRequest,
    responses(
        (status = 200, description = "Updated organization", body = OrganizationResponse),
        (status = 400, description = "Invalid input, unauthorized author, or existing member", body = crate::inbound::http::ErrorResponse),
        (status = 404, description = "Organization or user not found", body = crate::inbound::http::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::inbound::http::ErrorResponse)
    ),
    tags = ["organizations"],
    operation_id = "addMember"
)]
#[post("/organizations/{organization_id}/members/{author_id}")]
pub async fn add_member(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<AddMemberRequest>,
) -> ApiResult<web::Json<OrganizationResponse>> {
    let (organization_id, author_id) = path.into_inner();
    let body = payload.into_inner();
    let organization = state
        .memberships
        .add_member(AddMemberCommand {
            organization_id,
            author_id,
            user_id: body.user_id,
            access_level: body.access_level,
        })
        .await?;
    Ok(web::Json(OrganizationResponse::from(organization)))
}

/// Change an existing member's access level, authorized by an ADMIN author.
#[utoipa::path(
    patch,
    path = "/organizations/{organization_id}/members/{author_id}",
    params(
        ("organization_id" = String, Path, description = "Target organization identifier"),
        ("author_id" = String, Path, description = "Acting user; must be an ADMIN member")
    ),
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "Updated organization", body = OrganizationResponse),
        (status = 400, description = "Invalid input or unauthorized author", body = crate::inbound::http::ErrorResponse),
        (status = 404, description = "Organization, user, or member not found", body = crate::inbound::http::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::inbound::http::ErrorResponse)
    ),
    tags = ["organizations"],
    operation_id = "updateMemberAccessLevel"
)]
#[patch("/organizations/{organization_id}/members/{author_id}")]
pub async fn update_member_access_level(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateMemberRequest>,
) -> ApiResult<web::Json<OrganizationResponse>> {
    let (organization_id, author_id) = path.into_inner();
    let body = payload.into_inner();
    let organization = state
        .memberships
        .update_member_access_level(UpdateMemberAccessCommand {
            organization_id,
            author_id,
            user_id: body.user_id,
            access_level: body.access_level,
        })
        .await?;
    Ok(web::Json(OrganizationResponse::from(organization)))
}

/// Remove a member, authorized by an ADMIN author. The creator is always
/// rejected.
#[utoipa::path(
    delete,
    path = "/organizations/{organization_id}/members/{author_id}",
    params(
        ("organization_id" = String, Path, description = "Target organization identifier"),
        ("author_id" = String, Path, description = "Acting user; must be an ADMIN member")
    ),
    request_body = RemoveMemberRequest,
    responses(
        (status = 200, description = "Updated organization", body = OrganizationResponse),
        (status = 400, description = "Invalid input, unauthorized author, or protected creator", body = crate::inbound::http::ErrorResponse),
        (status = 404, description = "Organization or member not found", body = crate::inbound::http::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::inbound::http::ErrorResponse)
    ),
    tags = ["organizations"],
    operation_id = "removeMember"
)]
#[delete("/organizations/{organization_id}/members/{author_id}")]
pub async fn remove_member(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<RemoveMemberRequest>,
) -> ApiResult<web::Json<OrganizationResponse>> {
    let (organization_id, author_id) = path.into_inner();
    let body = payload.into_inner();
    let organization = state
        .memberships
        .remove_member(RemoveMemberCommand {
            organization_id,
            author_id,
            user_id: body.user_id,
        })
        .await?;
    Ok(web::Json(OrganizationResponse::from(organization)))
}
