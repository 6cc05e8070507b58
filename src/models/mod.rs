pub mod auth;
pub mod common;
pub mod competitions;
pub mod directory;
pub mod images;
pub mod records;
pub mod reviews;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;
