use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::RecordService;

pub async fn handle_get_record(
    service: &RecordService,
    record_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let detail = match storage.get_record_detail(record_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RecordNotFound,
                "获奖记录不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询获奖记录失败")),
    };

    // 学生只能查看自己提交的记录
    if RequireJWT::extract_user_role(request) == Some(UserRole::Student)
        && detail.submit_user != RequireJWT::extract_user_id(request)
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能查看自己提交的记录",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        detail,
        "Record retrieved successfully",
    )))
}
