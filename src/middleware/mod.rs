pub mod auth;
pub mod response;

pub use auth::{Authorized, Authorizer, RoutePermission};
pub use response::{ApiResponse, ApiResult, ResponseOk};
