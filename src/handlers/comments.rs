// handlers/comments.rs - /v1/comments handlers

use axum::extract::State;

use crate::api::models::{Comment, CommentRequest};
use crate::api::translate::{BackendResultExt, NO_RULES};
use crate::api::{Collection, IdPath, JsonBody, ListFilter, PagingRequest};
use crate::backend::{proto, BackendClient};
use crate::middleware::auth::{CreateComment, DeleteComment, UpdateComment};
use crate::middleware::{ApiResponse, ApiResult, Authorized, ResponseOk};

/// POST /v1/comments
pub async fn create(
    auth: Authorized<CreateComment>,
    State(backend): State<BackendClient>,
    JsonBody(req): JsonBody<CommentRequest>,
) -> ApiResult<Comment> {
    let comment = backend
        .comments()
        .create(proto::Comment {
            post_id: req.post_id,
            user_id: auth.payload.subject_id,
            description: req.description,
            ..Default::default()
        })
        .await
        .or_api_error("comments.create", NO_RULES)?;

    Ok(ApiResponse::created(comment.into()))
}

/// GET /v1/comments/:id
pub async fn get(State(backend): State<BackendClient>, IdPath(id): IdPath) -> ApiResult<Comment> {
    let comment = backend
        .comments()
        .get(proto::GetCommentRequest { id })
        .await
        .or_api_error("comments.get", NO_RULES)?;

    Ok(ApiResponse::ok(comment.into()))
}

/// GET /v1/comments
///
/// Optional `user_id` / `post_id` filters; zero on the wire means "any".
pub async fn list(
    State(backend): State<BackendClient>,
    paging: PagingRequest,
    filter: ListFilter,
) -> ApiResult<Collection<Comment>> {
    let page = backend
        .comments()
        .get_all(proto::GetAllCommentsRequest {
            limit: paging.limit,
            page: paging.page,
            search: paging.search,
            user_id: filter.user_id.unwrap_or_default(),
            post_id: filter.post_id.unwrap_or_default(),
        })
        .await
        .or_api_error("comments.get_all", NO_RULES)?;

    Ok(ApiResponse::ok(Collection::from_backend("comments", page.comments, page.count)))
}

/// PUT /v1/comments/:id
pub async fn update(
    auth: Authorized<UpdateComment>,
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
    JsonBody(req): JsonBody<CommentRequest>,
) -> ApiResult<Comment> {
    let comment = backend
        .comments()
        .update(proto::Comment {
            id,
            post_id: req.post_id,
            user_id: auth.payload.subject_id,
            description: req.description,
            ..Default::default()
        })
        .await
        .or_api_error("comments.update", NO_RULES)?;

    Ok(ApiResponse::ok(comment.into()))
}

/// DELETE /v1/comments/:id
pub async fn delete(
    _auth: Authorized<DeleteComment>,
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
) -> ApiResult<ResponseOk> {
    backend
        .comments()
        .delete(proto::GetCommentRequest { id })
        .await
        .or_api_error("comments.delete", NO_RULES)?;

    Ok(ApiResponse::ok(ResponseOk::success()))
}
