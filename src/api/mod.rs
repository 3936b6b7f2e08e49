pub mod extract;
pub mod models;
pub mod pagination;
pub mod translate;

pub use extract::{IdPath, JsonBody};
pub use models::{Collection, Validate};
pub use pagination::{ListFilter, PagingRequest};
pub use translate::{translate, BackendResultExt};
