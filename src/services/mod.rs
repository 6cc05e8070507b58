pub mod auth;
pub mod competitions;
pub mod directory;
pub mod images;
pub mod records;
pub mod reviews;
pub mod users;

pub use auth::AuthService;
pub use competitions::CompetitionService;
pub use directory::DirectoryService;
pub use images::ImageService;
pub use records::RecordService;
pub use reviews::ReviewService;
pub use users::UserService;

use actix_web::HttpResponse;

use crate::errors::AwardSysError;
use crate::models::{ApiResponse, ErrorCode};

// 存储层错误到 HTTP 响应的兜底映射。
// 需要更细错误码的分支（如学生/教师不存在）由各业务函数自行匹配。
pub(crate) fn storage_error_response(e: &AwardSysError, context: &str) -> HttpResponse {
    match e {
        AwardSysError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                ErrorCode::NotFound,
                msg.clone(),
            ))
        }
        AwardSysError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::<()>::error_empty(
                ErrorCode::Conflict,
                msg.clone(),
            ))
        }
        AwardSysError::Validation(msg) => HttpResponse::BadRequest().json(
            ApiResponse::<()>::error_empty(ErrorCode::ValidationFailed, msg.clone()),
        ),
        _ => {
            tracing::error!("{context}: {e}");
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {e}"),
            ))
        }
    }
}
