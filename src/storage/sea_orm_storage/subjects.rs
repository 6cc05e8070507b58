//! 专业存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{Colleges, SubjectModel};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{AwardSysError, Result};
use crate::models::{
    PaginationInfo,
    directory::{
        entities::Subject, requests::DirectoryQueryParams, responses::SubjectListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    // 组装带学院名称的专业视图
    async fn assemble_subject(&self, model: SubjectModel) -> Result<Subject> {
        let college = Colleges::find_by_id(model.college_id)
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学院失败: {e}")))?;

        Ok(Subject {
            id: model.id,
            name: model.name,
            college_id: model.college_id,
            college_name: college.map(|c| c.name).unwrap_or_default(),
        })
    }

    /// 创建专业（名称全局唯一）
    pub async fn create_subject_impl(&self, name: &str, college_id: i64) -> Result<Subject> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            college_id: Set(college_id),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        self.assemble_subject(result).await
    }

    /// 通过名称获取专业
    pub async fn get_subject_by_name_impl(&self, name: &str) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询专业失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.assemble_subject(model).await?)),
            None => Ok(None),
        }
    }

    /// 通过 ID 获取专业
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询专业失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.assemble_subject(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出专业
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: DirectoryQueryParams,
    ) -> Result<SubjectListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Subjects::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        select = select.order_by_asc(Column::Name);

        let paginator = select.find_also_related(Colleges).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询专业总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询专业页数失败: {e}")))?;

        let subjects = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询专业列表失败: {e}")))?;

        Ok(SubjectListResponse {
            items: subjects
                .into_iter()
                .map(|(m, college)| Subject {
                    id: m.id,
                    name: m.name,
                    college_id: m.college_id,
                    college_name: college.map(|c| c.name).unwrap_or_default(),
                })
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新专业（单条管理操作允许改属学院，批量导入永不走这里）
    pub async fn update_subject_impl(
        &self,
        id: i64,
        name: Option<String>,
        college_id: Option<i64>,
    ) -> Result<Option<Subject>> {
        let existing = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询专业失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(name) = name {
            model.name = Set(name);
        }

        if let Some(college_id) = college_id {
            model.college_id = Set(college_id);
        }

        model.update(&self.db).await?;

        self.get_subject_by_id_impl(id).await
    }

    /// 删除专业
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("删除专业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
