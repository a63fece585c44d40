//! User endpoints.

use actix_web::{HttpResponse, get, post, web};
use pagination::{DEFAULT_LIMIT, PageRequest};

use crate::domain::ports::CreateUserCommand;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    CreateUserRequest, ListQuery, UserResponse, UsersListResponse,
};
use crate::inbound::http::state::HttpState;

pub(crate) fn page_request(query: &ListQuery) -> Result<PageRequest, pagination::PageRequestError> {
    PageRequest::new(
        query.limit.unwrap_or(DEFAULT_LIMIT),
        query.offset.unwrap_or(0),
    )
}

/// Sign up a new user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid input or duplicate email", body = crate::inbound::http::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::inbound::http::ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let user = state
        .accounts
        .create_user(CreateUserCommand {
            name: body.name,
            email: body.email,
        })
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// List users with optional name filtering and pagination.
#[utoipa::path(
    get,
    path = "/users",
    params(ListQuery),
    responses(
        (status = 200, description = "One window of users", body = UsersListResponse),
        (status = 400, description = "Invalid window parameters", body = crate::inbound::http::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::inbound::http::ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<UsersListResponse>> {
    let query = query.into_inner();
    let page = page_request(&query)?;
    let users = state.accounts.list_users(query.name, page).await?;
    Ok(web::Json(UsersListResponse::from(users)))
}

/// Fetch a single user by identifier or email.
#[utoipa::path(
    get,
    path = "/users/{id_or_email}",
    params(("id_or_email" = String, Path, description = "Store identifier or email address")),
    responses(
        (status = 200, description = "The matching user", body = UserResponse),
        (status = 404, description = "No matching user", body = crate::inbound::http::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::inbound::http::ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id_or_email}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.accounts.get_user(&path.into_inner()).await?;
    Ok(web::Json(UserResponse::from(user)))
}
