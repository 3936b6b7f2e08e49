#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::task::JoinHandle;

use blog_api_gateway::auth::{AuthPayload, PermissionTable, Role, TokenCodec};
use blog_api_gateway::backend::{
    proto, AuthBackend, BackendClient, BackendError, BackendResult, CategoryBackend, CommentBackend, LikeBackend,
    PostBackend, UserBackend,
};
use blog_api_gateway::middleware::Authorizer;
use blog_api_gateway::{router, AppState, RouterOptions};

pub const SECRET: &str = "integration-test-secret";

/// In-process stand-in for every backend service.
///
/// Counts calls, records the last request per operation, and returns a
/// scripted failure for any operation registered in `failures`.
#[derive(Default)]
pub struct FakeBackend {
    calls: AtomicUsize,
    ops: Mutex<Vec<&'static str>>,
    failures: Mutex<HashMap<&'static str, BackendError>>,
    known_emails: Mutex<Vec<String>>,
    posts: Mutex<(Vec<proto::Post>, i32)>,
    pub last_posts_query: Mutex<Option<proto::GetAllPostsRequest>>,
    pub last_comments_query: Mutex<Option<proto::GetAllCommentsRequest>>,
    pub last_likes_query: Mutex<Option<proto::GetAllLikesRequest>>,
    pub last_post: Mutex<Option<proto::Post>>,
    pub last_comment: Mutex<Option<proto::Comment>>,
    pub last_like: Mutex<Option<proto::Like>>,
    pub last_register: Mutex<Option<proto::RegisterRequest>>,
}

impl FakeBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn ops(&self) -> Vec<&'static str> {
        self.ops.lock().unwrap().clone()
    }

    pub fn fail(&self, op: &'static str, err: BackendError) {
        self.failures.lock().unwrap().insert(op, err);
    }

    pub fn add_user(&self, email: &str) {
        self.known_emails.lock().unwrap().push(email.to_string());
    }

    pub fn set_posts(&self, posts: Vec<proto::Post>, count: i32) {
        *self.posts.lock().unwrap() = (posts, count);
    }

    fn enter(&self, op: &'static str) -> BackendResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ops.lock().unwrap().push(op);
        match self.failures.lock().unwrap().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

pub fn post(id: i64, title: &str) -> proto::Post {
    proto::Post {
        id,
        title: title.to_string(),
        description: format!("{} body", title),
        user_id: 1,
        category_id: 1,
        created_at: "2024-05-01T10:00:00Z".to_string(),
        ..Default::default()
    }
}

fn user(id: i64, email: &str) -> proto::User {
    proto::User {
        id,
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: email.to_string(),
        user_type: "user".to_string(),
        created_at: "2024-05-01T10:00:00Z".to_string(),
        ..Default::default()
    }
}

fn auth_response(email: &str) -> proto::AuthResponse {
    proto::AuthResponse {
        id: 1,
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: email.to_string(),
        username: "ann".to_string(),
        user_type: "user".to_string(),
        created_at: "2024-05-01T10:00:00Z".to_string(),
        access_token: "backend-minted-token".to_string(),
    }
}

#[async_trait]
impl UserBackend for FakeBackend {
    async fn create(&self, req: proto::User) -> BackendResult<proto::User> {
        self.enter("users.create")?;
        Ok(proto::User { id: 100, password: String::new(), ..req })
    }

    async fn get(&self, req: proto::GetUserRequest) -> BackendResult<proto::User> {
        self.enter("users.get")?;
        Ok(user(req.id, "ann@example.com"))
    }

    async fn get_all(&self, _req: proto::GetAllUsersRequest) -> BackendResult<proto::GetAllUsersResponse> {
        self.enter("users.get_all")?;
        Ok(proto::GetAllUsersResponse {
            users: vec![user(1, "ann@example.com")],
            count: 1,
        })
    }

    async fn update(&self, req: proto::User) -> BackendResult<proto::User> {
        self.enter("users.update")?;
        Ok(req)
    }

    async fn delete(&self, _req: proto::GetUserRequest) -> BackendResult<proto::Empty> {
        self.enter("users.delete")?;
        Ok(proto::Empty {})
    }

    async fn get_by_email(&self, req: proto::GetByEmailRequest) -> BackendResult<proto::User> {
        self.enter("users.get_by_email")?;
        if self.known_emails.lock().unwrap().contains(&req.email) {
            Ok(user(1, &req.email))
        } else {
            Err(BackendError::not_found("user not found"))
        }
    }
}

#[async_trait]
impl AuthBackend for FakeBackend {
    async fn register(&self, req: proto::RegisterRequest) -> BackendResult<proto::Empty> {
        self.enter("auth.register")?;
        *self.last_register.lock().unwrap() = Some(req);
        Ok(proto::Empty {})
    }

    async fn verify(&self, req: proto::VerifyRegisterRequest) -> BackendResult<proto::AuthResponse> {
        self.enter("auth.verify")?;
        Ok(auth_response(&req.email))
    }

    async fn login(&self, req: proto::LoginRequest) -> BackendResult<proto::AuthResponse> {
        self.enter("auth.login")?;
        Ok(auth_response(&req.email))
    }

    async fn forgot_password(&self, _req: proto::ForgotPasswordRequest) -> BackendResult<proto::Empty> {
        self.enter("auth.forgot_password")?;
        Ok(proto::Empty {})
    }
}

#[async_trait]
impl CategoryBackend for FakeBackend {
    async fn create(&self, req: proto::Category) -> BackendResult<proto::Category> {
        self.enter("categories.create")?;
        Ok(proto::Category { id: 5, ..req })
    }

    async fn get(&self, req: proto::GetCategoryRequest) -> BackendResult<proto::Category> {
        self.enter("categories.get")?;
        Ok(proto::Category {
            id: req.id,
            title: "Rust".to_string(),
            created_at: "2024-05-01T10:00:00Z".to_string(),
        })
    }

    async fn get_all(&self, _req: proto::GetAllCategoriesRequest) -> BackendResult<proto::GetAllCategoriesResponse> {
        self.enter("categories.get_all")?;
        Ok(proto::GetAllCategoriesResponse::default())
    }

    async fn update(&self, req: proto::Category) -> BackendResult<proto::Category> {
        self.enter("categories.update")?;
        Ok(req)
    }

    async fn delete(&self, _req: proto::GetCategoryRequest) -> BackendResult<proto::Empty> {
        self.enter("categories.delete")?;
        Ok(proto::Empty {})
    }
}

#[async_trait]
impl PostBackend for FakeBackend {
    async fn create(&self, req: proto::Post) -> BackendResult<proto::Post> {
        self.enter("posts.create")?;
        *self.last_post.lock().unwrap() = Some(req.clone());
        Ok(proto::Post { id: 77, ..req })
    }

    async fn get(&self, req: proto::GetPostRequest) -> BackendResult<proto::Post> {
        self.enter("posts.get")?;
        Ok(post(req.id, "hello"))
    }

    async fn get_all(&self, req: proto::GetAllPostsRequest) -> BackendResult<proto::GetAllPostsResponse> {
        self.enter("posts.get_all")?;
        *self.last_posts_query.lock().unwrap() = Some(req);
        let (posts, count) = self.posts.lock().unwrap().clone();
        Ok(proto::GetAllPostsResponse { posts, count })
    }

    async fn update(&self, req: proto::Post) -> BackendResult<proto::Post> {
        self.enter("posts.update")?;
        *self.last_post.lock().unwrap() = Some(req.clone());
        Ok(req)
    }

    async fn delete(&self, _req: proto::GetPostRequest) -> BackendResult<proto::Empty> {
        self.enter("posts.delete")?;
        Ok(proto::Empty {})
    }
}

#[async_trait]
impl CommentBackend for FakeBackend {
    async fn create(&self, req: proto::Comment) -> BackendResult<proto::Comment> {
        self.enter("comments.create")?;
        *self.last_comment.lock().unwrap() = Some(req.clone());
        Ok(proto::Comment { id: 9, ..req })
    }

    async fn get(&self, req: proto::GetCommentRequest) -> BackendResult<proto::Comment> {
        self.enter("comments.get")?;
        Ok(proto::Comment {
            id: req.id,
            post_id: 1,
            user_id: 1,
            description: "nice".to_string(),
            created_at: "2024-05-01T10:00:00Z".to_string(),
            ..Default::default()
        })
    }

    async fn get_all(&self, req: proto::GetAllCommentsRequest) -> BackendResult<proto::GetAllCommentsResponse> {
        self.enter("comments.get_all")?;
        *self.last_comments_query.lock().unwrap() = Some(req);
        Ok(proto::GetAllCommentsResponse::default())
    }

    async fn update(&self, req: proto::Comment) -> BackendResult<proto::Comment> {
        self.enter("comments.update")?;
        Ok(req)
    }

    async fn delete(&self, _req: proto::GetCommentRequest) -> BackendResult<proto::Empty> {
        self.enter("comments.delete")?;
        Ok(proto::Empty {})
    }
}

#[async_trait]
impl LikeBackend for FakeBackend {
    async fn create_or_update(&self, req: proto::Like) -> BackendResult<proto::Like> {
        self.enter("likes.create_or_update")?;
        *self.last_like.lock().unwrap() = Some(req.clone());
        Ok(proto::Like { id: 3, ..req })
    }

    async fn get(&self, req: proto::GetLikeRequest) -> BackendResult<proto::Like> {
        self.enter("likes.get")?;
        Ok(proto::Like {
            id: req.id,
            post_id: 1,
            user_id: 1,
            status: true,
        })
    }

    async fn get_all(&self, req: proto::GetAllLikesRequest) -> BackendResult<proto::GetAllLikesResponse> {
        self.enter("likes.get_all")?;
        *self.last_likes_query.lock().unwrap() = Some(req);
        Ok(proto::GetAllLikesResponse::default())
    }

    async fn update(&self, req: proto::Like) -> BackendResult<proto::Like> {
        self.enter("likes.update")?;
        Ok(req)
    }

    async fn delete(&self, _req: proto::GetLikeRequest) -> BackendResult<proto::Empty> {
        self.enter("likes.delete")?;
        Ok(proto::Empty {})
    }

    async fn get_likes_and_dislikes(
        &self,
        _req: proto::LikesAndDislikesRequest,
    ) -> BackendResult<proto::LikesAndDislikesCount> {
        self.enter("likes.get_likes_and_dislikes")?;
        Ok(proto::LikesAndDislikesCount { likes: 12, dislikes: 3 })
    }
}

pub struct TestServer {
    pub base_url: String,
    pub backend: Arc<FakeBackend>,
    pub client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve the real router on an unused port, backed by a fresh fake
pub async fn spawn_server() -> Result<TestServer> {
    let fake = Arc::new(FakeBackend::default());
    let backend = BackendClient::new(
        fake.clone(),
        fake.clone(),
        fake.clone(),
        fake.clone(),
        fake.clone(),
        fake.clone(),
    );

    let codec = TokenCodec::new(SECRET)?;
    let state = AppState::new(backend, Authorizer::new(codec, Arc::new(PermissionTable::standard())));
    let app = router(
        state,
        &RouterOptions {
            cors_origins: vec!["*".to_string()],
            request_logging: true,
        },
    );

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        backend: fake,
        client: reqwest::Client::new(),
        handle,
    })
}

pub fn token_with(secret: &str, user_id: i64, role: Role, ttl: Duration) -> String {
    let now = Utc::now();
    TokenCodec::new(secret)
        .unwrap()
        .issue(&AuthPayload {
            subject_id: user_id,
            role,
            issued_at: now - Duration::minutes(1),
            expires_at: now + ttl,
        })
        .unwrap()
}

pub fn token(user_id: i64, role: Role) -> String {
    token_with(SECRET, user_id, role, Duration::hours(1))
}

pub fn expired_token(role: Role) -> String {
    token_with(SECRET, 1, role, Duration::minutes(-5))
}
