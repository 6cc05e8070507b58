use serde::Serialize;

use super::entities::{User, UserRole};
use crate::models::PaginationInfo;

// 账号信息（对外视图）
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub user_type: UserRole,
    pub name: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub date_joined: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            user_type: user.role,
            name: user.display_name,
            last_login: user.last_login,
            date_joined: user.created_at,
        }
    }
}

// 账号列表响应
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub items: Vec<UserInfo>,
    pub pagination: PaginationInfo,
}
