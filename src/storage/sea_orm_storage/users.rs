//! 账号存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{AwardSysError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{User, UserRole},
        requests::{CreateUserData, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建账号（(角色, 用户名) 组合唯一）
    pub async fn create_user_impl(&self, user: CreateUserData) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            role: Set(user.role.to_string()),
            display_name: Set(user.display_name),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取账号
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名与角色获取账号（用户名仅在角色内唯一）
    pub async fn get_user_by_username_and_role_impl(
        &self,
        username: &str,
        role: UserRole,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .filter(Column::Role.eq(role.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出账号
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.max(1) as u64;
        let size = query.size.clamp(1, 100) as u64;

        let mut select = Users::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::DisplayName.contains(&escaped)),
            );
        }

        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询账号总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询账号页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询账号列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user().into()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新账号
    pub async fn update_user_impl(
        &self,
        id: i64,
        password_hash: Option<String>,
        display_name: Option<String>,
    ) -> Result<Option<User>> {
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(password_hash) = password_hash {
            model.password_hash = Set(password_hash);
        }

        if let Some(display_name) = display_name {
            model.display_name = Set(Some(display_name));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("更新账号失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除账号
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("删除账号失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计某角色的账号数量（启动时管理员种子检查）
    pub async fn count_users_by_role_impl(&self, role: UserRole) -> Result<u64> {
        let count = Users::find()
            .filter(Column::Role.eq(role.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("统计账号数量失败: {e}")))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::SeaOrmStorage;
    use crate::errors::AwardSysError;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserData;

    async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::new_with_url(":memory:")
            .await
            .expect("内存库初始化失败")
    }

    fn account(username: &str, role: UserRole) -> CreateUserData {
        CreateUserData {
            username: username.to_string(),
            password_hash: "unused".to_string(),
            role,
            display_name: None,
        }
    }

    #[actix_web::test]
    async fn username_unique_within_role_only() {
        let storage = memory_storage().await;

        storage
            .create_user_impl(account("20230001", UserRole::Student))
            .await
            .unwrap();

        // 同角色重名冲突
        let result = storage
            .create_user_impl(account("20230001", UserRole::Student))
            .await;
        assert!(matches!(result, Err(AwardSysError::Conflict(_))));

        // 不同角色可以重名
        storage
            .create_user_impl(account("20230001", UserRole::Teacher))
            .await
            .unwrap();

        let student = storage
            .get_user_by_username_and_role_impl("20230001", UserRole::Student)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.role, UserRole::Student);
    }

    #[actix_web::test]
    async fn count_users_by_role() {
        let storage = memory_storage().await;

        storage
            .create_user_impl(account("admin", UserRole::Admin))
            .await
            .unwrap();
        storage
            .create_user_impl(account("20230001", UserRole::Student))
            .await
            .unwrap();
        storage
            .create_user_impl(account("20230002", UserRole::Student))
            .await
            .unwrap();

        assert_eq!(
            storage.count_users_by_role_impl(UserRole::Admin).await.unwrap(),
            1
        );
        assert_eq!(
            storage
                .count_users_by_role_impl(UserRole::Student)
                .await
                .unwrap(),
            2
        );
        assert_eq!(
            storage
                .count_users_by_role_impl(UserRole::Teacher)
                .await
                .unwrap(),
            0
        );
    }

    #[actix_web::test]
    async fn update_last_login_touches_existing_user() {
        let storage = memory_storage().await;
        let user = storage
            .create_user_impl(account("admin", UserRole::Admin))
            .await
            .unwrap();
        assert!(user.last_login.is_none());

        assert!(storage.update_last_login_impl(user.id).await.unwrap());

        let reloaded = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert!(reloaded.last_login.is_some());
    }
}
