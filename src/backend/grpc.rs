//! gRPC implementations of the backend sub-clients.
//!
//! Each backend address is dialed once at startup; the resulting `Channel`
//! is cloned into every call and multiplexes concurrent requests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tracing::info;

use super::proto;
use super::{
    AuthBackend, BackendClient, BackendError, BackendResult, CategoryBackend, CommentBackend, LikeBackend,
    PostBackend, UserBackend,
};
use crate::config::{RpcConfig, ServicesConfig};

#[derive(Debug, Error)]
#[error("failed to connect to {service} at {addr}: {source}")]
pub struct ConnectError {
    pub service: &'static str,
    pub addr: String,
    #[source]
    pub source: tonic::transport::Error,
}

/// Unary call helper over one shared channel
#[derive(Clone)]
struct RpcChannel {
    inner: Grpc<Channel>,
}

impl RpcChannel {
    fn new(channel: Channel) -> Self {
        Self {
            inner: Grpc::new(channel),
        }
    }

    async fn unary<Req, Resp>(&self, path: &'static str, request: Req) -> BackendResult<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = self.inner.clone();
        grpc.ready()
            .await
            .map_err(|e| BackendError::unavailable(format!("service not ready: {}", e)))?;

        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        let response = grpc
            .unary(tonic::Request::new(request), PathAndQuery::from_static(path), codec)
            .await?;

        Ok(response.into_inner())
    }
}

async fn dial(addr: &str, rpc: &RpcConfig) -> Result<Channel, tonic::transport::Error> {
    Endpoint::from_shared(addr.to_string())?
        .timeout(Duration::from_secs(rpc.timeout_secs))
        .connect_timeout(Duration::from_secs(rpc.connect_timeout_secs))
        .connect()
        .await
}

/// Caches one channel per distinct address while dialing
struct Dialer<'a> {
    rpc: &'a RpcConfig,
    channels: HashMap<String, Channel>,
}

impl Dialer<'_> {
    async fn open(&mut self, service: &'static str, addr: &str) -> Result<RpcChannel, ConnectError> {
        if let Some(channel) = self.channels.get(addr) {
            return Ok(RpcChannel::new(channel.clone()));
        }

        info!(service, addr, "connecting to backend");
        let channel = dial(addr, self.rpc).await.map_err(|source| ConnectError {
            service,
            addr: addr.to_string(),
            source,
        })?;

        self.channels.insert(addr.to_string(), channel.clone());
        Ok(RpcChannel::new(channel))
    }
}

/// Dial every configured backend and assemble the dispatch facade.
///
/// Services that share an address share a single channel.
pub async fn connect(services: &ServicesConfig, rpc: &RpcConfig) -> Result<BackendClient, ConnectError> {
    let mut dialer = Dialer {
        rpc,
        channels: HashMap::new(),
    };

    let users = dialer.open("user_service", &services.user).await?;
    let auth = dialer.open("auth_service", &services.auth).await?;
    let categories = dialer.open("category_service", &services.category).await?;
    let posts = dialer.open("post_service", &services.post).await?;
    let comments = dialer.open("comment_service", &services.comment).await?;
    let likes = dialer.open("like_service", &services.like).await?;

    Ok(BackendClient::new(
        Arc::new(GrpcUserClient(users)),
        Arc::new(GrpcAuthClient(auth)),
        Arc::new(GrpcCategoryClient(categories)),
        Arc::new(GrpcPostClient(posts)),
        Arc::new(GrpcCommentClient(comments)),
        Arc::new(GrpcLikeClient(likes)),
    ))
}

struct GrpcUserClient(RpcChannel);

#[async_trait]
impl UserBackend for GrpcUserClient {
    async fn create(&self, req: proto::User) -> BackendResult<proto::User> {
        self.0.unary("/genproto.UserService/Create", req).await
    }

    async fn get(&self, req: proto::GetUserRequest) -> BackendResult<proto::User> {
        self.0.unary("/genproto.UserService/Get", req).await
    }

    async fn get_all(&self, req: proto::GetAllUsersRequest) -> BackendResult<proto::GetAllUsersResponse> {
        self.0.unary("/genproto.UserService/GetAll", req).await
    }

    async fn update(&self, req: proto::User) -> BackendResult<proto::User> {
        self.0.unary("/genproto.UserService/Update", req).await
    }

    async fn delete(&self, req: proto::GetUserRequest) -> BackendResult<proto::Empty> {
        self.0.unary("/genproto.UserService/Delete", req).await
    }

    async fn get_by_email(&self, req: proto::GetByEmailRequest) -> BackendResult<proto::User> {
        self.0.unary("/genproto.UserService/GetByEmail", req).await
    }
}

struct GrpcAuthClient(RpcChannel);

#[async_trait]
impl AuthBackend for GrpcAuthClient {
    async fn register(&self, req: proto::RegisterRequest) -> BackendResult<proto::Empty> {
        self.0.unary("/genproto.AuthService/Register", req).await
    }

    async fn verify(&self, req: proto::VerifyRegisterRequest) -> BackendResult<proto::AuthResponse> {
        self.0.unary("/genproto.AuthService/Verify", req).await
    }

    async fn login(&self, req: proto::LoginRequest) -> BackendResult<proto::AuthResponse> {
        self.0.unary("/genproto.AuthService/Login", req).await
    }

    async fn forgot_password(&self, req: proto::ForgotPasswordRequest) -> BackendResult<proto::Empty> {
        self.0.unary("/genproto.AuthService/ForgotPassword", req).await
    }
}

struct GrpcCategoryClient(RpcChannel);

#[async_trait]
impl CategoryBackend for GrpcCategoryClient {
    async fn create(&self, req: proto::Category) -> BackendResult<proto::Category> {
        self.0.unary("/genproto.CategoryService/Create", req).await
    }

    async fn get(&self, req: proto::GetCategoryRequest) -> BackendResult<proto::Category> {
        self.0.unary("/genproto.CategoryService/Get", req).await
    }

    async fn get_all(&self, req: proto::GetAllCategoriesRequest) -> BackendResult<proto::GetAllCategoriesResponse> {
        self.0.unary("/genproto.CategoryService/GetAll", req).await
    }

    async fn update(&self, req: proto::Category) -> BackendResult<proto::Category> {
        self.0.unary("/genproto.CategoryService/Update", req).await
    }

    async fn delete(&self, req: proto::GetCategoryRequest) -> BackendResult<proto::Empty> {
        self.0.unary("/genproto.CategoryService/Delete", req).await
    }
}

struct GrpcPostClient(RpcChannel);

#[async_trait]
impl PostBackend for GrpcPostClient {
    async fn create(&self, req: proto::Post) -> BackendResult<proto::Post> {
        self.0.unary("/genproto.PostService/Create", req).await
    }

    async fn get(&self, req: proto::GetPostRequest) -> BackendResult<proto::Post> {
        self.0.unary("/genproto.PostService/Get", req).await
    }

    async fn get_all(&self, req: proto::GetAllPostsRequest) -> BackendResult<proto::GetAllPostsResponse> {
        self.0.unary("/genproto.PostService/GetAll", req).await
    }

    async fn update(&self, req: proto::Post) -> BackendResult<proto::Post> {
        self.0.unary("/genproto.PostService/Update", req).await
    }

    async fn delete(&self, req: proto::GetPostRequest) -> BackendResult<proto::Empty> {
        self.0.unary("/genproto.PostService/Delete", req).await
    }
}

struct GrpcCommentClient(RpcChannel);

#[async_trait]
impl CommentBackend for GrpcCommentClient {
    async fn create(&self, req: proto::Comment) -> BackendResult<proto::Comment> {
        self.0.unary("/genproto.CommentService/Create", req).await
    }

    async fn get(&self, req: proto::GetCommentRequest) -> BackendResult<proto::Comment> {
        self.0.unary("/genproto.CommentService/Get", req).await
    }

    async fn get_all(&self, req: proto::GetAllCommentsRequest) -> BackendResult<proto::GetAllCommentsResponse> {
        self.0.unary("/genproto.CommentService/GetAll", req).await
    }

    async fn update(&self, req: proto::Comment) -> BackendResult<proto::Comment> {
        self.0.unary("/genproto.CommentService/Update", req).await
    }

    async fn delete(&self, req: proto::GetCommentRequest) -> BackendResult<proto::Empty> {
        self.0.unary("/genproto.CommentService/Delete", req).await
    }
}

struct GrpcLikeClient(RpcChannel);

#[async_trait]
impl LikeBackend for GrpcLikeClient {
    async fn create_or_update(&self, req: proto::Like) -> BackendResult<proto::Like> {
        // The like service upserts on (post_id, user_id) behind its plain Create method
        self.0.unary("/genproto.LikeService/Create", req).await
    }

    async fn get(&self, req: proto::GetLikeRequest) -> BackendResult<proto::Like> {
        self.0.unary("/genproto.LikeService/Get", req).await
    }

    async fn get_all(&self, req: proto::GetAllLikesRequest) -> BackendResult<proto::GetAllLikesResponse> {
        self.0.unary("/genproto.LikeService/GetAll", req).await
    }

    async fn update(&self, req: proto::Like) -> BackendResult<proto::Like> {
        self.0.unary("/genproto.LikeService/Update", req).await
    }

    async fn delete(&self, req: proto::GetLikeRequest) -> BackendResult<proto::Empty> {
        self.0.unary("/genproto.LikeService/Delete", req).await
    }

    // Not part of the published LikeService descriptor; the method name is assumed
    async fn get_likes_and_dislikes(
        &self,
        req: proto::LikesAndDislikesRequest,
    ) -> BackendResult<proto::LikesAndDislikesCount> {
        self.0.unary("/genproto.LikeService/GetLikesDislikesCount", req).await
    }
}
