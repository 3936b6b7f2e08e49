//! Backend dispatch client.
//!
//! [`BackendClient`] is a typed, addressed proxy over the backend services:
//! one sub-client per domain, each bound to its own connection. It holds no
//! business logic and never retries.

use std::sync::Arc;

use async_trait::async_trait;

pub mod error;
pub mod grpc;
pub mod proto;

pub use error::{BackendCode, BackendError, BackendResult};

#[async_trait]
pub trait UserBackend: Send + Sync {
    async fn create(&self, req: proto::User) -> BackendResult<proto::User>;
    async fn get(&self, req: proto::GetUserRequest) -> BackendResult<proto::User>;
    async fn get_all(&self, req: proto::GetAllUsersRequest) -> BackendResult<proto::GetAllUsersResponse>;
    async fn update(&self, req: proto::User) -> BackendResult<proto::User>;
    async fn delete(&self, req: proto::GetUserRequest) -> BackendResult<proto::Empty>;
    async fn get_by_email(&self, req: proto::GetByEmailRequest) -> BackendResult<proto::User>;
}

#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn register(&self, req: proto::RegisterRequest) -> BackendResult<proto::Empty>;
    async fn verify(&self, req: proto::VerifyRegisterRequest) -> BackendResult<proto::AuthResponse>;
    async fn login(&self, req: proto::LoginRequest) -> BackendResult<proto::AuthResponse>;
    async fn forgot_password(&self, req: proto::ForgotPasswordRequest) -> BackendResult<proto::Empty>;
}

#[async_trait]
pub trait CategoryBackend: Send + Sync {
    async fn create(&self, req: proto::Category) -> BackendResult<proto::Category>;
    async fn get(&self, req: proto::GetCategoryRequest) -> BackendResult<proto::Category>;
    async fn get_all(&self, req: proto::GetAllCategoriesRequest) -> BackendResult<proto::GetAllCategoriesResponse>;
    async fn update(&self, req: proto::Category) -> BackendResult<proto::Category>;
    async fn delete(&self, req: proto::GetCategoryRequest) -> BackendResult<proto::Empty>;
}

#[async_trait]
pub trait PostBackend: Send + Sync {
    async fn create(&self, req: proto::Post) -> BackendResult<proto::Post>;
    async fn get(&self, req: proto::GetPostRequest) -> BackendResult<proto::Post>;
    async fn get_all(&self, req: proto::GetAllPostsRequest) -> BackendResult<proto::GetAllPostsResponse>;
    async fn update(&self, req: proto::Post) -> BackendResult<proto::Post>;
    async fn delete(&self, req: proto::GetPostRequest) -> BackendResult<proto::Empty>;
}

#[async_trait]
pub trait CommentBackend: Send + Sync {
    async fn create(&self, req: proto::Comment) -> BackendResult<proto::Comment>;
    async fn get(&self, req: proto::GetCommentRequest) -> BackendResult<proto::Comment>;
    async fn get_all(&self, req: proto::GetAllCommentsRequest) -> BackendResult<proto::GetAllCommentsResponse>;
    async fn update(&self, req: proto::Comment) -> BackendResult<proto::Comment>;
    async fn delete(&self, req: proto::GetCommentRequest) -> BackendResult<proto::Empty>;
}

#[async_trait]
pub trait LikeBackend: Send + Sync {
    async fn create_or_update(&self, req: proto::Like) -> BackendResult<proto::Like>;
    async fn get(&self, req: proto::GetLikeRequest) -> BackendResult<proto::Like>;
    async fn get_all(&self, req: proto::GetAllLikesRequest) -> BackendResult<proto::GetAllLikesResponse>;
    async fn update(&self, req: proto::Like) -> BackendResult<proto::Like>;
    async fn delete(&self, req: proto::GetLikeRequest) -> BackendResult<proto::Empty>;
    async fn get_likes_and_dislikes(
        &self,
        req: proto::LikesAndDislikesRequest,
    ) -> BackendResult<proto::LikesAndDislikesCount>;
}

/// Facade over every backend sub-client. Cheap to clone; clones share the
/// underlying connections.
#[derive(Clone)]
pub struct BackendClient {
    users: Arc<dyn UserBackend>,
    auth: Arc<dyn AuthBackend>,
    categories: Arc<dyn CategoryBackend>,
    posts: Arc<dyn PostBackend>,
    comments: Arc<dyn CommentBackend>,
    likes: Arc<dyn LikeBackend>,
}

impl BackendClient {
    pub fn new(
        users: Arc<dyn UserBackend>,
        auth: Arc<dyn AuthBackend>,
        categories: Arc<dyn CategoryBackend>,
        posts: Arc<dyn PostBackend>,
        comments: Arc<dyn CommentBackend>,
        likes: Arc<dyn LikeBackend>,
    ) -> Self {
        Self {
            users,
            auth,
            categories,
            posts,
            comments,
            likes,
        }
    }

    pub fn users(&self) -> &dyn UserBackend {
        self.users.as_ref()
    }

    pub fn auth(&self) -> &dyn AuthBackend {
        self.auth.as_ref()
    }

    pub fn categories(&self) -> &dyn CategoryBackend {
        self.categories.as_ref()
    }

    pub fn posts(&self) -> &dyn PostBackend {
        self.posts.as_ref()
    }

    pub fn comments(&self) -> &dyn CommentBackend {
        self.comments.as_ref()
    }

    pub fn likes(&self) -> &dyn LikeBackend {
        self.likes.as_ref()
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient").finish_non_exhaustive()
    }
}
