//! Public JSON shapes of the gateway.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::auth::Role;

/// Field-level checks applied after a body deserializes
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

fn required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

fn email(value: &str) -> Result<(), String> {
    required("email", value)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(format!("'{}' is not a valid email", value)),
    }
}

fn positive_id(field: &str, value: i64) -> Result<(), String> {
    if value <= 0 {
        return Err(format!("{} must be a positive integer", field));
    }
    Ok(())
}

// ---- auth ----

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), String> {
        required("first_name", &self.first_name)?;
        required("last_name", &self.last_name)?;
        email(&self.email)?;
        required("password", &self.password)
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

impl Validate for VerifyRequest {
    fn validate(&self) -> Result<(), String> {
        email(&self.email)?;
        required("code", &self.code)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        email(&self.email)?;
        required("password", &self.password)
    }
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl Validate for ForgotPasswordRequest {
    fn validate(&self) -> Result<(), String> {
        email(&self.email)
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub created_at: String,
    pub access_token: String,
}

// ---- users ----

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub username: Option<String>,
    pub profile_image_url: Option<String>,
    #[serde(rename = "type")]
    pub user_type: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub password: String,
    pub username: Option<String>,
    pub profile_image_url: Option<String>,
    #[serde(rename = "type", default = "default_role")]
    pub user_type: Role,
}

fn default_role() -> Role {
    Role::User
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), String> {
        required("first_name", &self.first_name)?;
        required("last_name", &self.last_name)?;
        email(&self.email)?;
        required("password", &self.password)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub username: Option<String>,
    pub profile_image_url: Option<String>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), String> {
        required("first_name", &self.first_name)?;
        required("last_name", &self.last_name)
    }
}

// ---- categories ----

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub title: String,
}

impl Validate for CategoryRequest {
    fn validate(&self) -> Result<(), String> {
        required("title", &self.title)
    }
}

// ---- posts ----

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub user_id: i64,
    pub category_id: i64,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub views_count: i32,
}

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category_id: i64,
}

impl Validate for PostRequest {
    fn validate(&self) -> Result<(), String> {
        required("title", &self.title)?;
        required("description", &self.description)?;
        positive_id("category_id", self.category_id)
    }
}

// ---- comments ----

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub description: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub post_id: i64,
    pub description: String,
}

impl Validate for CommentRequest {
    fn validate(&self) -> Result<(), String> {
        positive_id("post_id", self.post_id)?;
        required("description", &self.description)
    }
}

// ---- likes ----

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Like {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub status: bool,
}

/// `status: true` is a like, `false` a dislike
#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub post_id: i64,
    pub status: bool,
}

impl Validate for LikeRequest {
    fn validate(&self) -> Result<(), String> {
        positive_id("post_id", self.post_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct LikesAndDislikesQuery {
    pub post_id: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LikesAndDislikes {
    pub likes: i64,
    pub dislikes: i64,
}

/// Page of items as returned by a backend.
///
/// Serializes as `{ "<key>": [...], "count": N }` where `count` is the total
/// number of matches, not the page size.
#[derive(Debug, PartialEq, Eq)]
pub struct Collection<T> {
    key: &'static str,
    pub items: Vec<T>,
    pub count: i64,
}

impl<T> Collection<T> {
    pub fn from_backend<U: Into<T>>(key: &'static str, items: Vec<U>, count: i32) -> Self {
        Self {
            key,
            items: items.into_iter().map(Into::into).collect(),
            count: i64::from(count),
        }
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.key, &self.items)?;
        map.serialize_entry("count", &self.count)?;
        map.end()
    }
}
