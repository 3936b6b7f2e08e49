// handlers/auth.rs - public /v1/auth/* handlers

use axum::extract::State;

use crate::api::models::{AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterRequest, VerifyRequest};
use crate::api::translate::{self, BackendResultExt, EMAIL_EXISTS, LOGIN_RULES, NO_RULES, VERIFY_RULES};
use crate::api::JsonBody;
use crate::auth::password::is_strong_password;
use crate::backend::{proto, BackendClient, BackendCode};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, ResponseOk};

pub const CODE_SENT: &str = "Validation code has been sent";

/// POST /v1/auth/register
///
/// Weak passwords are refused locally. An existing account for the email is
/// refused with `email already exists`; a not-found lookup means the email is
/// free and the registration goes through.
pub async fn register(
    State(backend): State<BackendClient>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<ResponseOk> {
    if !is_strong_password(&req.password) {
        return Err(ApiError::WeakPassword);
    }

    match backend
        .users()
        .get_by_email(proto::GetByEmailRequest {
            email: req.email.clone(),
        })
        .await
    {
        Ok(_) => return Err(ApiError::DomainRejected(EMAIL_EXISTS)),
        Err(err) if err.code == BackendCode::NotFound => {}
        Err(err) => {
            tracing::error!(operation = "users.get_by_email", "email lookup failed: {}", err);
            return Err(translate::translate(err, NO_RULES));
        }
    }

    backend
        .auth()
        .register(proto::RegisterRequest {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        })
        .await
        .or_api_error("auth.register", NO_RULES)?;

    Ok(ApiResponse::ok(ResponseOk::success()))
}

/// POST /v1/auth/verify
pub async fn verify(
    State(backend): State<BackendClient>,
    JsonBody(req): JsonBody<VerifyRequest>,
) -> ApiResult<AuthResponse> {
    let auth = backend
        .auth()
        .verify(proto::VerifyRegisterRequest {
            email: req.email,
            code: req.code,
        })
        .await
        .or_api_error("auth.verify", VERIFY_RULES)?;

    Ok(ApiResponse::created(auth.into()))
}

/// POST /v1/auth/login
pub async fn login(
    State(backend): State<BackendClient>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let auth = backend
        .auth()
        .login(proto::LoginRequest {
            email: req.email,
            password: req.password,
        })
        .await
        .or_api_error("auth.login", LOGIN_RULES)?;

    Ok(ApiResponse::ok(auth.into()))
}

/// POST /v1/auth/verify-forgot-password
pub async fn forgot_password(
    State(backend): State<BackendClient>,
    JsonBody(req): JsonBody<ForgotPasswordRequest>,
) -> ApiResult<ResponseOk> {
    backend
        .auth()
        .forgot_password(proto::ForgotPasswordRequest { email: req.email })
        .await
        .or_api_error("auth.forgot_password", NO_RULES)?;

    Ok(ApiResponse::created(ResponseOk::new(CODE_SENT)))
}
