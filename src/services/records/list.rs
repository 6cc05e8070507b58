use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::records::requests::RecordListQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::RecordService;

pub async fn handle_list_records(
    service: &RecordService,
    mut query: RecordListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "用户未登录",
            )));
        }
    };

    // 学生只能看到自己提交的记录
    if RequireJWT::extract_user_role(request) == Some(UserRole::Student) {
        query.submit_user = Some(user_id);
    }

    match storage.list_records_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Records retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "查询获奖记录列表失败")),
    }
}
