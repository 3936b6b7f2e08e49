//! `limit` / `page` / `search` normalization for list endpoints.
//!
//! The gateway never slices results itself; the normalized request goes to
//! the backend unchanged and the backend's `count` is authoritative.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::error::ApiError;

pub const DEFAULT_LIMIT: i32 = 10;
pub const DEFAULT_PAGE: i32 = 1;

/// Raw query parameters, kept as strings so bad values are reported by name
#[derive(Debug, Default, Deserialize)]
pub struct PagingQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingRequest {
    pub limit: i32,
    pub page: i32,
    pub search: String,
}

impl Default for PagingRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            search: String::new(),
        }
    }
}

impl PagingRequest {
    pub fn from_query(query: PagingQuery) -> Result<Self, ApiError> {
        Ok(Self {
            limit: parse_positive("limit", query.limit.as_deref())?.unwrap_or(DEFAULT_LIMIT),
            page: parse_positive("page", query.page.as_deref())?.unwrap_or(DEFAULT_PAGE),
            search: query.search.unwrap_or_default(),
        })
    }
}

/// Optional owner filters accepted by the comment and like listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub user_id: Option<i64>,
    pub post_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListFilterQuery {
    pub user_id: Option<String>,
    pub post_id: Option<String>,
}

impl ListFilter {
    pub fn from_query(query: ListFilterQuery) -> Result<Self, ApiError> {
        Ok(Self {
            user_id: parse_positive("user_id", query.user_id.as_deref())?,
            post_id: parse_positive("post_id", query.post_id.as_deref())?,
        })
    }
}

/// Absent or empty means "use the default"; anything else must be a
/// positive integer.
pub(crate) fn parse_positive<T>(name: &str, raw: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    match raw.parse::<T>() {
        Ok(value) if value > T::default() => Ok(Some(value)),
        _ => Err(ApiError::invalid_parameter(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PagingRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PagingQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_parameter(e.body_text()))?;
        Self::from_query(query)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ListFilter
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ListFilterQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_parameter(e.body_text()))?;
        Self::from_query(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>, page: Option<&str>, search: Option<&str>) -> PagingQuery {
        PagingQuery {
            limit: limit.map(String::from),
            page: page.map(String::from),
            search: search.map(String::from),
        }
    }

    #[test]
    fn defaults_when_absent() {
        let paging = PagingRequest::from_query(PagingQuery::default()).unwrap();
        assert_eq!(paging, PagingRequest { limit: 10, page: 1, search: String::new() });
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let paging = PagingRequest::from_query(query(Some(""), Some(""), None)).unwrap();
        assert_eq!(paging.limit, DEFAULT_LIMIT);
        assert_eq!(paging.page, DEFAULT_PAGE);
    }

    #[test]
    fn explicit_values_pass_through() {
        let paging = PagingRequest::from_query(query(Some("25"), Some("3"), Some("rust async"))).unwrap();
        assert_eq!(paging, PagingRequest { limit: 25, page: 3, search: "rust async".into() });
    }

    #[test]
    fn non_integer_limit_is_invalid_parameter() {
        let err = PagingRequest::from_query(query(Some("abc"), None, None)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter(ref msg) if msg.contains("limit")));
    }

    #[test]
    fn zero_and_negative_are_rejected() {
        assert!(PagingRequest::from_query(query(Some("0"), None, None)).is_err());
        assert!(PagingRequest::from_query(query(None, Some("-2"), None)).is_err());
    }

    #[test]
    fn overflowing_page_is_rejected() {
        assert!(PagingRequest::from_query(query(None, Some("99999999999"), None)).is_err());
    }

    #[test]
    fn filters_parse_as_ids() {
        let filter = ListFilter::from_query(ListFilterQuery {
            user_id: Some("4".into()),
            post_id: None,
        })
        .unwrap();
        assert_eq!(filter, ListFilter { user_id: Some(4), post_id: None });

        assert!(ListFilter::from_query(ListFilterQuery {
            user_id: None,
            post_id: Some("x".into()),
        })
        .is_err());
    }
}
