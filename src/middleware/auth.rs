use std::marker::PhantomData;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::auth::{Action, AuthPayload, PermissionTable, Resource, TokenCodec, TokenError};
use crate::error::ApiError;

/// Token verification plus role check for protected routes.
///
/// Holds the startup-built permission table by reference; nothing here
/// touches global state.
#[derive(Debug, Clone)]
pub struct Authorizer {
    codec: TokenCodec,
    permissions: Arc<PermissionTable>,
}

impl Authorizer {
    pub fn new(codec: TokenCodec, permissions: Arc<PermissionTable>) -> Self {
        Self { codec, permissions }
    }

    /// Runs the full check for one request. The returned payload is the only
    /// proof of authorization; handlers receive it as an argument.
    pub fn authorize(&self, headers: &HeaderMap, resource: Resource, action: Action) -> Result<AuthPayload, ApiError> {
        let token = extract_bearer_token(headers).map_err(|msg| {
            tracing::debug!(resource = resource.as_str(), action = action.as_str(), "{}", msg);
            ApiError::unauthorized(msg)
        })?;

        let payload = self.codec.verify(token).map_err(|e| {
            tracing::warn!(resource = resource.as_str(), action = action.as_str(), "token rejected: {}", e);
            match e {
                TokenError::TokenExpired => ApiError::unauthorized("token has expired"),
                _ => ApiError::unauthorized("invalid token"),
            }
        })?;

        if !self.permissions.is_allowed(resource, action, payload.role) {
            tracing::warn!(
                user_id = payload.subject_id,
                role = payload.role.as_str(),
                resource = resource.as_str(),
                action = action.as_str(),
                "permission denied"
            );
            return Err(ApiError::forbidden(format!(
                "role '{}' is not allowed to {} {}",
                payload.role,
                action.as_str(),
                resource.as_str()
            )));
        }

        Ok(payload)
    }
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or("missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "invalid Authorization header format")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("empty bearer token");
    }

    Ok(token)
}

/// The (resource, action) pair a protected route declares
pub trait RoutePermission: Send + Sync + 'static {
    const RESOURCE: Resource;
    const ACTION: Action;
}

/// Extractor that authorizes the request for `P` before the handler runs.
///
/// Parts extractors run before the body is read, so a rejected caller never
/// gets as far as body parsing, let alone a backend call.
#[derive(Debug)]
pub struct Authorized<P: RoutePermission> {
    pub payload: AuthPayload,
    _route: PhantomData<fn() -> P>,
}

#[async_trait]
impl<S, P> FromRequestParts<S> for Authorized<P>
where
    S: Send + Sync,
    P: RoutePermission,
    Arc<Authorizer>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let authorizer = Arc::<Authorizer>::from_ref(state);
        let payload = authorizer.authorize(&parts.headers, P::RESOURCE, P::ACTION)?;
        Ok(Self {
            payload,
            _route: PhantomData,
        })
    }
}

macro_rules! route_permissions {
    ($($name:ident => ($resource:ident, $action:ident)),* $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $name;

            impl RoutePermission for $name {
                const RESOURCE: Resource = Resource::$resource;
                const ACTION: Action = Action::$action;
            }
        )*
    };
}

route_permissions! {
    CreateUser => (Users, Create),
    UpdateUser => (Users, Update),
    DeleteUser => (Users, Delete),
    CreateCategory => (Categories, Create),
    UpdateCategory => (Categories, Update),
    DeleteCategory => (Categories, Delete),
    CreatePost => (Posts, Create),
    UpdatePost => (Posts, Update),
    DeletePost => (Posts, Delete),
    CreateComment => (Comments, Create),
    UpdateComment => (Comments, Update),
    DeleteComment => (Comments, Delete),
    CreateLike => (Likes, Create),
    UpdateLike => (Likes, Update),
    DeleteLike => (Likes, Delete),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use axum::http::{HeaderValue, StatusCode};
    use chrono::{Duration, Utc};

    fn authorizer() -> Authorizer {
        Authorizer::new(TokenCodec::new("test-secret").unwrap(), Arc::new(PermissionTable::standard()))
    }

    fn bearer(role: Role, ttl: Duration) -> HeaderMap {
        let now = Utc::now();
        let token = TokenCodec::new("test-secret")
            .unwrap()
            .issue(&AuthPayload {
                subject_id: 7,
                role,
                issued_at: now,
                expires_at: now + ttl,
            })
            .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token)).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = authorizer()
            .authorize(&HeaderMap::new(), Resource::Posts, Action::Create)
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        let err = authorizer().authorize(&headers, Resource::Posts, Action::Create).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let headers = bearer(Role::Admin, Duration::seconds(-10));
        let err = authorizer().authorize(&headers, Resource::Posts, Action::Create).unwrap_err();
        assert_eq!(err, ApiError::unauthorized("token has expired"));
    }

    #[test]
    fn insufficient_role_is_forbidden() {
        let headers = bearer(Role::User, Duration::hours(1));
        let err = authorizer()
            .authorize(&headers, Resource::Categories, Action::Delete)
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn allowed_role_yields_payload() {
        let headers = bearer(Role::User, Duration::hours(1));
        let payload = authorizer().authorize(&headers, Resource::Posts, Action::Create).unwrap();
        assert_eq!(payload.subject_id, 7);
        assert_eq!(payload.role, Role::User);
    }

    #[test]
    fn markers_declare_their_pair() {
        assert_eq!(DeleteCategory::RESOURCE, Resource::Categories);
        assert_eq!(DeleteCategory::ACTION, Action::Delete);
        assert_eq!(CreateLike::RESOURCE, Resource::Likes);
    }
}
