use serde::Deserialize;

use super::entities::UserRole;
use crate::models::common::pagination::PaginationQuery;

// 创建账号请求
//
// # username 字段说明
// - 管理员账号：自由用户名
// - 学生/教师账号：必须是已存在的学生/教师的 card_id，创建后账号与其绑定
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub user_type: UserRole,
    pub username: String,
    // 缺省时使用 username 作为初始密码（与原系统行为一致）
    pub password: Option<String>,
    pub name: Option<String>,
}

// 更新账号请求
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub name: Option<String>,
}

// 账号列表查询参数
#[derive(Debug, Deserialize)]
pub struct UserQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub user_type: Option<UserRole>,
    pub search: Option<String>,
}

// 账号列表查询（存储层）
#[derive(Debug, Clone)]
pub struct UserListQuery {
    pub page: i64,
    pub size: i64,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

// 存储层创建账号
#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub display_name: Option<String>,
}
