//! Backend payloads into response DTOs, backend failures into `ApiError`.

use crate::api::models::{AuthResponse, Category, Comment, Like, LikesAndDislikes, Post, User};
use crate::backend::{proto, BackendCode, BackendError};
use crate::error::ApiError;

pub const WRONG_EMAIL_OR_PASSWORD: &str = "wrong email or password";
pub const EMAIL_EXISTS: &str = "email already exists";
pub const INCORRECT_CODE: &str = "incorrect verification code";
pub const CODE_EXPIRED: &str = "verification code has been expired";

/// Domain codes a handler recognizes, each paired with its fixed message
pub type Recognized = &'static [(BackendCode, &'static str)];

pub const NO_RULES: Recognized = &[];
pub const LOGIN_RULES: Recognized = &[(BackendCode::IncorrectPassword, WRONG_EMAIL_OR_PASSWORD)];
pub const VERIFY_RULES: Recognized = &[
    (BackendCode::IncorrectCode, INCORRECT_CODE),
    (BackendCode::CodeExpired, CODE_EXPIRED),
];

/// Map a backend failure onto the HTTP taxonomy.
///
/// Not-found wins over everything, then the handler's recognized codes,
/// then the transport class.
pub fn translate(err: BackendError, recognized: Recognized) -> ApiError {
    if err.code == BackendCode::NotFound {
        return ApiError::NotFound(err.message);
    }

    if let Some(&(_, message)) = recognized.iter().find(|(code, _)| *code == err.code) {
        return ApiError::DomainRejected(message);
    }

    match err.code {
        BackendCode::Unavailable => ApiError::BackendUnavailable(err.message),
        _ => ApiError::BackendInternal(err.message),
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        translate(err, NO_RULES)
    }
}

/// Log-then-translate for backend results inside handlers
pub trait BackendResultExt<T> {
    fn or_api_error(self, operation: &'static str, recognized: Recognized) -> Result<T, ApiError>;
}

impl<T> BackendResultExt<T> for Result<T, BackendError> {
    fn or_api_error(self, operation: &'static str, recognized: Recognized) -> Result<T, ApiError> {
        self.map_err(|err| {
            match err.code {
                BackendCode::NotFound => tracing::debug!(operation, "{}", err),
                _ => tracing::error!(operation, code = err.code.as_str(), "backend call failed: {}", err.message),
            }
            translate(err, recognized)
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<proto::User> for User {
    fn from(user: proto::User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: non_empty(user.phone_number),
            email: user.email,
            gender: non_empty(user.gender),
            username: non_empty(user.username),
            profile_image_url: non_empty(user.profile_image_url),
            user_type: user.user_type,
            created_at: user.created_at,
        }
    }
}

impl From<proto::AuthResponse> for AuthResponse {
    fn from(auth: proto::AuthResponse) -> Self {
        Self {
            id: auth.id,
            first_name: auth.first_name,
            last_name: auth.last_name,
            email: auth.email,
            username: auth.username,
            user_type: auth.user_type,
            created_at: auth.created_at,
            access_token: auth.access_token,
        }
    }
}

impl From<proto::Category> for Category {
    fn from(category: proto::Category) -> Self {
        Self {
            id: category.id,
            title: category.title,
            created_at: category.created_at,
        }
    }
}

impl From<proto::Post> for Post {
    fn from(post: proto::Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            image_url: non_empty(post.image_url),
            user_id: post.user_id,
            category_id: post.category_id,
            created_at: post.created_at,
            updated_at: non_empty(post.updated_at),
            views_count: post.views_count,
        }
    }
}

impl From<proto::Comment> for Comment {
    fn from(comment: proto::Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            description: comment.description,
            created_at: comment.created_at,
            updated_at: non_empty(comment.updated_at),
        }
    }
}

impl From<proto::Like> for Like {
    fn from(like: proto::Like) -> Self {
        Self {
            id: like.id,
            post_id: like.post_id,
            user_id: like.user_id,
            status: like.status,
        }
    }
}

impl From<proto::LikesAndDislikesCount> for LikesAndDislikes {
    fn from(count: proto::LikesAndDislikesCount) -> Self {
        Self {
            likes: count.likes,
            dislikes: count.dislikes,
        }
    }
}
