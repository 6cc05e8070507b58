//! 学院存储操作

use super::SeaOrmStorage;
use crate::entity::colleges::{ActiveModel, Column, Entity as Colleges};
use crate::errors::{AwardSysError, Result};
use crate::models::{
    PaginationInfo,
    directory::{
        entities::College, requests::DirectoryQueryParams, responses::CollegeListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建学院（名称唯一，重名由唯一约束拦截并上报 Conflict）
    pub async fn create_college_impl(&self, name: &str) -> Result<College> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into_college())
    }

    /// 通过名称获取学院
    pub async fn get_college_by_name_impl(&self, name: &str) -> Result<Option<College>> {
        let result = Colleges::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学院失败: {e}")))?;

        Ok(result.map(|m| m.into_college()))
    }

    /// 通过 ID 获取学院
    pub async fn get_college_by_id_impl(&self, id: i64) -> Result<Option<College>> {
        let result = Colleges::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学院失败: {e}")))?;

        Ok(result.map(|m| m.into_college()))
    }

    /// 分页列出学院
    pub async fn list_colleges_with_pagination_impl(
        &self,
        query: DirectoryQueryParams,
    ) -> Result<CollegeListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Colleges::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        select = select.order_by_asc(Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学院总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学院页数失败: {e}")))?;

        let colleges = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学院列表失败: {e}")))?;

        Ok(CollegeListResponse {
            items: colleges.into_iter().map(|m| m.into_college()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新学院名称
    pub async fn update_college_impl(&self, id: i64, name: &str) -> Result<Option<College>> {
        let existing = self.get_college_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
        };

        model.update(&self.db).await?;

        self.get_college_by_id_impl(id).await
    }

    /// 删除学院（级联删除其专业与班级）
    pub async fn delete_college_impl(&self, id: i64) -> Result<bool> {
        let result = Colleges::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("删除学院失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
