//! Wire messages of the `genproto` package shared with the backend services.
//!
//! Field tags must stay in sync with the backend `.proto` definitions.

#[derive(Clone, PartialEq, prost::Message)]
pub struct Empty {}

// ---- user_service ----

#[derive(Clone, PartialEq, prost::Message)]
pub struct User {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub first_name: String,
    #[prost(string, tag = "3")]
    pub last_name: String,
    #[prost(string, tag = "4")]
    pub phone_number: String,
    #[prost(string, tag = "5")]
    pub email: String,
    #[prost(string, tag = "6")]
    pub gender: String,
    #[prost(string, tag = "7")]
    pub password: String,
    #[prost(string, tag = "8")]
    pub username: String,
    #[prost(string, tag = "9")]
    pub profile_image_url: String,
    #[prost(string, tag = "10")]
    pub user_type: String,
    #[prost(string, tag = "11")]
    pub created_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetUserRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetByEmailRequest {
    #[prost(string, tag = "1")]
    pub email: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllUsersRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
    #[prost(int32, tag = "2")]
    pub page: i32,
    #[prost(string, tag = "3")]
    pub search: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllUsersResponse {
    #[prost(message, repeated, tag = "1")]
    pub users: Vec<User>,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RegisterRequest {
    #[prost(string, tag = "1")]
    pub first_name: String,
    #[prost(string, tag = "2")]
    pub last_name: String,
    #[prost(string, tag = "3")]
    pub email: String,
    #[prost(string, tag = "4")]
    pub password: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct VerifyRegisterRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub code: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LoginRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub password: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AuthResponse {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub first_name: String,
    #[prost(string, tag = "3")]
    pub last_name: String,
    #[prost(string, tag = "4")]
    pub email: String,
    #[prost(string, tag = "5")]
    pub username: String,
    #[prost(string, tag = "6")]
    pub user_type: String,
    #[prost(string, tag = "7")]
    pub created_at: String,
    #[prost(string, tag = "8")]
    pub access_token: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ForgotPasswordRequest {
    #[prost(string, tag = "1")]
    pub email: String,
}

// ---- post_service ----

#[derive(Clone, PartialEq, prost::Message)]
pub struct Category {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub title: String,
    #[prost(string, tag = "3")]
    pub created_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetCategoryRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllCategoriesRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
    #[prost(int32, tag = "2")]
    pub page: i32,
    #[prost(string, tag = "3")]
    pub search: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllCategoriesResponse {
    #[prost(message, repeated, tag = "1")]
    pub categories: Vec<Category>,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Post {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub title: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(string, tag = "4")]
    pub image_url: String,
    #[prost(int64, tag = "5")]
    pub user_id: i64,
    #[prost(int64, tag = "6")]
    pub category_id: i64,
    #[prost(string, tag = "7")]
    pub created_at: String,
    #[prost(string, tag = "8")]
    pub updated_at: String,
    #[prost(int32, tag = "9")]
    pub views_count: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetPostRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllPostsRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
    #[prost(int32, tag = "2")]
    pub page: i32,
    #[prost(string, tag = "3")]
    pub search: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllPostsResponse {
    #[prost(message, repeated, tag = "1")]
    pub posts: Vec<Post>,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Comment {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(int64, tag = "2")]
    pub post_id: i64,
    #[prost(int64, tag = "3")]
    pub user_id: i64,
    #[prost(string, tag = "4")]
    pub description: String,
    #[prost(string, tag = "5")]
    pub created_at: String,
    #[prost(string, tag = "6")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetCommentRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllCommentsRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
    #[prost(int32, tag = "2")]
    pub page: i32,
    #[prost(string, tag = "3")]
    pub search: String,
    #[prost(int64, tag = "4")]
    pub user_id: i64,
    #[prost(int64, tag = "5")]
    pub post_id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllCommentsResponse {
    #[prost(message, repeated, tag = "1")]
    pub comments: Vec<Comment>,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Like {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(int64, tag = "2")]
    pub post_id: i64,
    #[prost(int64, tag = "3")]
    pub user_id: i64,
    #[prost(bool, tag = "4")]
    pub status: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetLikeRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllLikesRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
    #[prost(int32, tag = "2")]
    pub page: i32,
    #[prost(string, tag = "3")]
    pub search: String,
    #[prost(int64, tag = "4")]
    pub user_id: i64,
    #[prost(int64, tag = "5")]
    pub post_id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllLikesResponse {
    #[prost(message, repeated, tag = "1")]
    pub likes: Vec<Like>,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LikesAndDislikesRequest {
    #[prost(int64, tag = "1")]
    pub post_id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LikesAndDislikesCount {
    #[prost(int64, tag = "1")]
    pub likes: i64,
    #[prost(int64, tag = "2")]
    pub dislikes: i64,
}
