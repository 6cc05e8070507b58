//! 教师存储操作

use super::SeaOrmStorage;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{AwardSysError, Result};
use crate::models::{
    PaginationInfo,
    directory::{
        entities::Teacher, requests::DirectoryQueryParams, responses::TeacherListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建教师（工号唯一）
    pub async fn create_teacher_impl(&self, card_id: &str, name: &str) -> Result<Teacher> {
        let model = ActiveModel {
            card_id: Set(card_id.to_string()),
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into_teacher())
    }

    /// 通过工号获取教师
    pub async fn get_teacher_by_card_id_impl(&self, card_id: &str) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::CardId.eq(card_id))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 分页列出教师
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: DirectoryQueryParams,
    ) -> Result<TeacherListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Teachers::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::CardId.contains(&escaped))
                    .add(Column::Name.contains(&escaped)),
            );
        }

        select = select.order_by_asc(Column::CardId);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询教师总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询教师页数失败: {e}")))?;

        let teachers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(TeacherListResponse {
            items: teachers.into_iter().map(|m| m.into_teacher()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 按工号覆盖姓名（批量导入语义）
    pub async fn upsert_teacher_impl(&self, card_id: &str, name: &str) -> Result<Teacher> {
        let existing = Teachers::find()
            .filter(Column::CardId.eq(card_id))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询教师失败: {e}")))?;

        match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.name = Set(name.to_string());
                let updated = active.update(&self.db).await?;
                Ok(updated.into_teacher())
            }
            None => self.create_teacher_impl(card_id, name).await,
        }
    }

    /// 更新教师姓名
    pub async fn update_teacher_impl(&self, card_id: &str, name: &str) -> Result<Option<Teacher>> {
        let existing = Teachers::find()
            .filter(Column::CardId.eq(card_id))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询教师失败: {e}")))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.name = Set(name.to_string());
        let updated = active.update(&self.db).await?;

        Ok(Some(updated.into_teacher()))
    }

    /// 删除教师
    pub async fn delete_teacher_impl(&self, card_id: &str) -> Result<bool> {
        let result = Teachers::delete_many()
            .filter(Column::CardId.eq(card_id))
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 绑定登录账号
    pub async fn bind_teacher_user_impl(&self, card_id: &str, user_id: i64) -> Result<bool> {
        let result = Teachers::update_many()
            .col_expr(Column::UserId, sea_orm::sea_query::Expr::value(user_id))
            .filter(Column::CardId.eq(card_id))
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("绑定教师账号失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
