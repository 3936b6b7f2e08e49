use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;

use crate::api::models::Validate;
use crate::error::ApiError;

/// JSON body that has been deserialized and validated.
///
/// An oversized body becomes `PayloadTooLarge`; any other rejection (wrong
/// content type, syntax error, missing field, failed validation) becomes
/// `InvalidRequestBody`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge(e.body_text())
            } else {
                ApiError::invalid_request_body(e.body_text())
            }
        })?;
        value.validate().map_err(ApiError::invalid_request_body)?;
        Ok(Self(value))
    }
}

/// Numeric `:id` path segment
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_parameter(e.body_text()))?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ApiError::invalid_parameter(format!(
                "id must be a positive integer, got '{}'",
                raw
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Titled {
        title: String,
    }

    impl Validate for Titled {
        fn validate(&self) -> Result<(), String> {
            if self.title.is_empty() {
                return Err("title is required".into());
            }
            Ok(())
        }
    }

    fn json_request(body: impl Into<Body>) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn valid_body_is_accepted() {
        let JsonBody(body) = JsonBody::<Titled>::from_request(json_request(r#"{"title":"x"}"#), &())
            .await
            .unwrap();
        assert_eq!(body.title, "x");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let err = JsonBody::<Titled>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::InvalidRequestBody(_)));
    }

    #[tokio::test]
    async fn failed_validation_is_bad_request() {
        let err = JsonBody::<Titled>::from_request(json_request(r#"{"title":""}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::invalid_request_body("title is required"));
    }

    #[tokio::test]
    async fn oversized_body_is_payload_too_large() {
        let body = format!(r#"{{"title":"{}"}}"#, "x".repeat(3 * 1024 * 1024));
        let err = JsonBody::<Titled>::from_request(json_request(body), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(matches!(err, ApiError::PayloadTooLarge(_)));
    }
}
