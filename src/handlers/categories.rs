// handlers/categories.rs - /v1/categories handlers

use axum::extract::State;

use crate::api::models::{Category, CategoryRequest};
use crate::api::translate::{BackendResultExt, NO_RULES};
use crate::api::{Collection, IdPath, JsonBody, PagingRequest};
use crate::backend::{proto, BackendClient};
use crate::middleware::auth::{CreateCategory, DeleteCategory, UpdateCategory};
use crate::middleware::{ApiResponse, ApiResult, Authorized, ResponseOk};

/// POST /v1/categories
pub async fn create(
    _auth: Authorized<CreateCategory>,
    State(backend): State<BackendClient>,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> ApiResult<Category> {
    let category = backend
        .categories()
        .create(proto::Category {
            title: req.title,
            ..Default::default()
        })
        .await
        .or_api_error("categories.create", NO_RULES)?;

    Ok(ApiResponse::created(category.into()))
}

/// GET /v1/categories/:id
pub async fn get(State(backend): State<BackendClient>, IdPath(id): IdPath) -> ApiResult<Category> {
    let category = backend
        .categories()
        .get(proto::GetCategoryRequest { id })
        .await
        .or_api_error("categories.get", NO_RULES)?;

    Ok(ApiResponse::ok(category.into()))
}

/// GET /v1/categories
pub async fn list(State(backend): State<BackendClient>, paging: PagingRequest) -> ApiResult<Collection<Category>> {
    let page = backend
        .categories()
        .get_all(proto::GetAllCategoriesRequest {
            limit: paging.limit,
            page: paging.page,
            search: paging.search,
        })
        .await
        .or_api_error("categories.get_all", NO_RULES)?;

    Ok(ApiResponse::ok(Collection::from_backend("categories", page.categories, page.count)))
}

/// PUT /v1/categories/:id
pub async fn update(
    _auth: Authorized<UpdateCategory>,
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> ApiResult<Category> {
    let category = backend
        .categories()
        .update(proto::Category {
            id,
            title: req.title,
            ..Default::default()
        })
        .await
        .or_api_error("categories.update", NO_RULES)?;

    Ok(ApiResponse::ok(category.into()))
}

/// DELETE /v1/categories/:id
pub async fn delete(
    _auth: Authorized<DeleteCategory>,
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
) -> ApiResult<ResponseOk> {
    backend
        .categories()
        .delete(proto::GetCategoryRequest { id })
        .await
        .or_api_error("categories.delete", NO_RULES)?;

    Ok(ApiResponse::ok(ResponseOk::success()))
}
