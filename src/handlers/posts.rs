// handlers/posts.rs - /v1/posts handlers

use axum::extract::State;

use crate::api::models::{Post, PostRequest};
use crate::api::translate::{BackendResultExt, NO_RULES};
use crate::api::{Collection, IdPath, JsonBody, PagingRequest};
use crate::backend::{proto, BackendClient};
use crate::middleware::auth::{CreatePost, DeletePost, UpdatePost};
use crate::middleware::{ApiResponse, ApiResult, Authorized, ResponseOk};

/// POST /v1/posts
///
/// The author is the token's subject, never a body field.
pub async fn create(
    auth: Authorized<CreatePost>,
    State(backend): State<BackendClient>,
    JsonBody(req): JsonBody<PostRequest>,
) -> ApiResult<Post> {
    let post = backend
        .posts()
        .create(proto::Post {
            title: req.title,
            description: req.description,
            image_url: req.image_url.unwrap_or_default(),
            user_id: auth.payload.subject_id,
            category_id: req.category_id,
            ..Default::default()
        })
        .await
        .or_api_error("posts.create", NO_RULES)?;

    Ok(ApiResponse::created(post.into()))
}

/// GET /v1/posts/:id
pub async fn get(State(backend): State<BackendClient>, IdPath(id): IdPath) -> ApiResult<Post> {
    let post = backend
        .posts()
        .get(proto::GetPostRequest { id })
        .await
        .or_api_error("posts.get", NO_RULES)?;

    Ok(ApiResponse::ok(post.into()))
}

/// GET /v1/posts
pub async fn list(State(backend): State<BackendClient>, paging: PagingRequest) -> ApiResult<Collection<Post>> {
    let page = backend
        .posts()
        .get_all(proto::GetAllPostsRequest {
            limit: paging.limit,
            page: paging.page,
            search: paging.search,
        })
        .await
        .or_api_error("posts.get_all", NO_RULES)?;

    Ok(ApiResponse::ok(Collection::from_backend("posts", page.posts, page.count)))
}

/// PUT /v1/posts/:id
pub async fn update(
    auth: Authorized<UpdatePost>,
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
    JsonBody(req): JsonBody<PostRequest>,
) -> ApiResult<Post> {
    let post = backend
        .posts()
        .update(proto::Post {
            id,
            title: req.title,
            description: req.description,
            image_url: req.image_url.unwrap_or_default(),
            user_id: auth.payload.subject_id,
            category_id: req.category_id,
            ..Default::default()
        })
        .await
        .or_api_error("posts.update", NO_RULES)?;

    Ok(ApiResponse::ok(post.into()))
}

/// DELETE /v1/posts/:id
pub async fn delete(
    _auth: Authorized<DeletePost>,
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
) -> ApiResult<ResponseOk> {
    backend
        .posts()
        .delete(proto::GetPostRequest { id })
        .await
        .or_api_error("posts.delete", NO_RULES)?;

    Ok(ApiResponse::ok(ResponseOk::success()))
}
