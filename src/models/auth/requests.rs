use serde::Deserialize;

use crate::models::users::entities::UserRole;

// 用户登录请求（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// 登录身份类型（admin / teacher / student）
    pub user_type: UserRole,
    /// 用户名（学生/教师为 card_id）
    pub username: String,
    /// 密码
    pub password: String,
}

// 修改个人资料请求（改密码时必须携带旧密码）
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}
