use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserInfo;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::password::hash_password;

use super::UserService;

// 管理员侧更新：重置密码不需要旧密码
pub async fn handle_update_user(
    service: &UserService,
    user_id: i64,
    update_request: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let password_hash = match &update_request.password {
        Some(password) => match hash_password(password) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::error!("密码哈希失败: {}", e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(ErrorCode::InternalServerError, "密码处理失败"),
                ));
            }
        },
        None => None,
    };

    match storage
        .update_user(user_id, password_hash, update_request.name)
        .await
    {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfo::from(user),
            "User updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "账号不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e, "更新账号失败")),
    }
}
