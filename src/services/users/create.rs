use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserData, CreateUserRequest};
use crate::models::users::responses::UserInfo;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::password::hash_password;
use crate::utils::validate::validate_username;

use super::UserService;

/// 创建账号。
///
/// 学生/教师账号的用户名必须是目录里已有的学号/工号，创建成功后账号与档案绑定；
/// 管理员账号的用户名自由选取。缺省初始密码为用户名本身。
pub async fn handle_create_user(
    service: &UserService,
    create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let username = create_request.username.trim().to_string();
    let role = create_request.user_type.clone();

    // 管理员用户名走通用规则，学生/教师用户名即学号/工号，由目录校验
    if role == UserRole::Admin
        && let Err(msg) = validate_username(&username)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg,
        )));
    }

    // 同角色内用户名唯一
    match storage
        .get_user_by_username_and_role(&username, role.clone())
        .await
    {
        Ok(Some(_)) => {
            let (code, msg) = match role {
                UserRole::Student => (ErrorCode::StudentAlreadyBound, "该学生已有账号"),
                UserRole::Teacher => (ErrorCode::TeacherAlreadyBound, "该教师已有账号"),
                UserRole::Admin => (ErrorCode::UserAlreadyExists, "用户名已被占用"),
            };
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(code, msg)));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_error_response(&e, "查询账号失败")),
    }

    // 学生/教师账号必须对应已有档案
    let bound_name = match role {
        UserRole::Student => match storage.get_student_by_card_id(&username).await {
            Ok(Some(student)) => Some(student.name),
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::StudentNotFound,
                    format!("学生不存在: {username}"),
                )));
            }
            Err(e) => return Ok(storage_error_response(&e, "查询学生失败")),
        },
        UserRole::Teacher => match storage.get_teacher_by_card_id(&username).await {
            Ok(Some(teacher)) => Some(teacher.name),
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::TeacherNotFound,
                    format!("教师不存在: {username}"),
                )));
            }
            Err(e) => return Ok(storage_error_response(&e, "查询教师失败")),
        },
        UserRole::Admin => None,
    };

    let password = create_request
        .password
        .clone()
        .unwrap_or_else(|| username.clone());
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("密码哈希失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "密码处理失败",
                )),
            );
        }
    };

    // 显示名优先取请求里的 name，学生/教师缺省用档案姓名
    let display_name = create_request.name.clone().or(bound_name);

    let user = match storage
        .create_user(CreateUserData {
            username: username.clone(),
            password_hash,
            role: role.clone(),
            display_name,
        })
        .await
    {
        Ok(user) => user,
        Err(e) => return Ok(storage_error_response(&e, "创建账号失败")),
    };

    // 账号落库后回写目录绑定
    let bind_result = match role {
        UserRole::Student => storage.bind_student_user(&username, user.id).await,
        UserRole::Teacher => storage.bind_teacher_user(&username, user.id).await,
        UserRole::Admin => Ok(true),
    };
    if let Err(e) = bind_result {
        tracing::error!("绑定账号到目录档案失败: {}", e);
    }

    tracing::info!("账号创建成功: {} ({})", user.username, user.role);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfo::from(user),
        "User created successfully",
    )))
}
