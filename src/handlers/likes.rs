// handlers/likes.rs - /v1/likes handlers

use axum::extract::{rejection::QueryRejection, Query, State};

use crate::api::models::{Like, LikeRequest, LikesAndDislikes, LikesAndDislikesQuery};
use crate::api::pagination::parse_positive;
use crate::api::translate::{BackendResultExt, NO_RULES};
use crate::api::{Collection, IdPath, JsonBody, ListFilter, PagingRequest};
use crate::backend::{proto, BackendClient};
use crate::error::ApiError;
use crate::middleware::auth::{CreateLike, DeleteLike, UpdateLike};
use crate::middleware::{ApiResponse, ApiResult, Authorized, ResponseOk};

/// POST /v1/likes
///
/// Create-or-update: a second reaction from the same user on the same post
/// replaces the first.
pub async fn create_or_update(
    auth: Authorized<CreateLike>,
    State(backend): State<BackendClient>,
    JsonBody(req): JsonBody<LikeRequest>,
) -> ApiResult<Like> {
    let like = backend
        .likes()
        .create_or_update(proto::Like {
            post_id: req.post_id,
            user_id: auth.payload.subject_id,
            status: req.status,
            ..Default::default()
        })
        .await
        .or_api_error("likes.create_or_update", NO_RULES)?;

    Ok(ApiResponse::created(like.into()))
}

/// GET /v1/likes/:id
pub async fn get(State(backend): State<BackendClient>, IdPath(id): IdPath) -> ApiResult<Like> {
    let like = backend
        .likes()
        .get(proto::GetLikeRequest { id })
        .await
        .or_api_error("likes.get", NO_RULES)?;

    Ok(ApiResponse::ok(like.into()))
}

/// GET /v1/likes
pub async fn list(
    State(backend): State<BackendClient>,
    paging: PagingRequest,
    filter: ListFilter,
) -> ApiResult<Collection<Like>> {
    let page = backend
        .likes()
        .get_all(proto::GetAllLikesRequest {
            limit: paging.limit,
            page: paging.page,
            search: paging.search,
            user_id: filter.user_id.unwrap_or_default(),
            post_id: filter.post_id.unwrap_or_default(),
        })
        .await
        .or_api_error("likes.get_all", NO_RULES)?;

    Ok(ApiResponse::ok(Collection::from_backend("likes", page.likes, page.count)))
}

/// GET /v1/likes/get-likes-and-dislikes?post_id=N
pub async fn likes_and_dislikes(
    State(backend): State<BackendClient>,
    query: Result<Query<LikesAndDislikesQuery>, QueryRejection>,
) -> ApiResult<LikesAndDislikes> {
    let Query(query) = query.map_err(|e| ApiError::invalid_parameter(e.body_text()))?;
    let post_id = parse_positive::<i64>("post_id", query.post_id.as_deref())?
        .ok_or_else(|| ApiError::invalid_parameter("post_id is required"))?;

    let counts = backend
        .likes()
        .get_likes_and_dislikes(proto::LikesAndDislikesRequest { post_id })
        .await
        .or_api_error("likes.get_likes_and_dislikes", NO_RULES)?;

    Ok(ApiResponse::ok(counts.into()))
}

/// PUT /v1/likes/:id
pub async fn update(
    auth: Authorized<UpdateLike>,
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
    JsonBody(req): JsonBody<LikeRequest>,
) -> ApiResult<Like> {
    let like = backend
        .likes()
        .update(proto::Like {
            id,
            post_id: req.post_id,
            user_id: auth.payload.subject_id,
            status: req.status,
        })
        .await
        .or_api_error("likes.update", NO_RULES)?;

    Ok(ApiResponse::ok(like.into()))
}

/// DELETE /v1/likes/:id
pub async fn delete(
    _auth: Authorized<DeleteLike>,
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
) -> ApiResult<ResponseOk> {
    backend
        .likes()
        .delete(proto::GetLikeRequest { id })
        .await
        .or_api_error("likes.delete", NO_RULES)?;

    Ok(ApiResponse::ok(ResponseOk::success()))
}
