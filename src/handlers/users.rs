// handlers/users.rs - /v1/users handlers

use axum::extract::{Path, State};

use crate::api::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::api::translate::{BackendResultExt, NO_RULES};
use crate::api::{Collection, IdPath, JsonBody, PagingRequest};
use crate::auth::Role;
use crate::backend::{proto, BackendClient};
use crate::error::ApiError;
use crate::middleware::auth::{CreateUser, DeleteUser, UpdateUser};
use crate::middleware::{ApiResponse, ApiResult, Authorized, ResponseOk};

/// POST /v1/users
pub async fn create(
    auth: Authorized<CreateUser>,
    State(backend): State<BackendClient>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> ApiResult<User> {
    tracing::debug!(admin_id = auth.payload.subject_id, email = %req.email, "creating user");

    let user = backend
        .users()
        .create(proto::User {
            first_name: req.first_name,
            last_name: req.last_name,
            phone_number: req.phone_number.unwrap_or_default(),
            email: req.email,
            gender: req.gender.unwrap_or_default(),
            password: req.password,
            username: req.username.unwrap_or_default(),
            profile_image_url: req.profile_image_url.unwrap_or_default(),
            user_type: req.user_type.as_str().to_string(),
            ..Default::default()
        })
        .await
        .or_api_error("users.create", NO_RULES)?;

    Ok(ApiResponse::created(user.into()))
}

/// GET /v1/users/:id
pub async fn get(State(backend): State<BackendClient>, IdPath(id): IdPath) -> ApiResult<User> {
    let user = backend
        .users()
        .get(proto::GetUserRequest { id })
        .await
        .or_api_error("users.get", NO_RULES)?;

    Ok(ApiResponse::ok(user.into()))
}

/// GET /v1/users/email/:email
pub async fn get_by_email(State(backend): State<BackendClient>, Path(email): Path<String>) -> ApiResult<User> {
    let user = backend
        .users()
        .get_by_email(proto::GetByEmailRequest { email })
        .await
        .or_api_error("users.get_by_email", NO_RULES)?;

    Ok(ApiResponse::ok(user.into()))
}

/// GET /v1/users
pub async fn list(State(backend): State<BackendClient>, paging: PagingRequest) -> ApiResult<Collection<User>> {
    let page = backend
        .users()
        .get_all(proto::GetAllUsersRequest {
            limit: paging.limit,
            page: paging.page,
            search: paging.search,
        })
        .await
        .or_api_error("users.get_all", NO_RULES)?;

    Ok(ApiResponse::ok(Collection::from_backend("users", page.users, page.count)))
}

/// PUT /v1/users/:id
///
/// Admins may update any account, everyone else only their own.
pub async fn update(
    auth: Authorized<UpdateUser>,
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> ApiResult<User> {
    if auth.payload.role != Role::Admin && auth.payload.subject_id != id {
        tracing::warn!(user_id = auth.payload.subject_id, target_id = id, "update of another account denied");
        return Err(ApiError::forbidden("cannot update another user's account"));
    }

    let user = backend
        .users()
        .update(proto::User {
            id,
            first_name: req.first_name,
            last_name: req.last_name,
            phone_number: req.phone_number.unwrap_or_default(),
            gender: req.gender.unwrap_or_default(),
            username: req.username.unwrap_or_default(),
            profile_image_url: req.profile_image_url.unwrap_or_default(),
            ..Default::default()
        })
        .await
        .or_api_error("users.update", NO_RULES)?;

    Ok(ApiResponse::ok(user.into()))
}

/// DELETE /v1/users/:id
pub async fn delete(
    _auth: Authorized<DeleteUser>,
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
) -> ApiResult<ResponseOk> {
    backend
        .users()
        .delete(proto::GetUserRequest { id })
        .await
        .or_api_error("users.delete", NO_RULES)?;

    Ok(ApiResponse::ok(ResponseOk::success()))
}
