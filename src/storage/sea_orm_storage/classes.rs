//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::prelude::{ClassModel, Colleges, Subjects};
use crate::entity::subjects::Column as SubjectColumn;
use crate::errors::{AwardSysError, Result};
use crate::models::{
    PaginationInfo,
    directory::{entities::Class, requests::ClassQueryParams, responses::ClassListResponse},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    // 组装带专业/学院名称的班级视图
    async fn assemble_class(&self, model: ClassModel) -> Result<Class> {
        let subject = Subjects::find_by_id(model.subject_id)
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询专业失败: {e}")))?;

        let (subject_name, college_name) = match subject {
            Some(s) => {
                let college = Colleges::find_by_id(s.college_id)
                    .one(&self.db)
                    .await
                    .map_err(|e| {
                        AwardSysError::database_operation(format!("查询学院失败: {e}"))
                    })?;
                (s.name, college.map(|c| c.name).unwrap_or_default())
            }
            None => (String::new(), String::new()),
        };

        Ok(Class {
            id: model.id,
            grade: model.grade,
            number: model.number,
            subject_id: model.subject_id,
            subject_name,
            college_name,
        })
    }

    /// 创建班级（(年级, 班号, 专业) 三元组唯一）
    pub async fn create_class_impl(
        &self,
        grade: i32,
        number: i32,
        subject_id: i64,
    ) -> Result<Class> {
        let model = ActiveModel {
            grade: Set(grade),
            number: Set(number),
            subject_id: Set(subject_id),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        self.assemble_class(result).await
    }

    /// 通过 (年级, 班号, 专业) 三元组获取班级
    pub async fn get_class_by_triple_impl(
        &self,
        grade: i32,
        number: i32,
        subject_id: i64,
    ) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::Grade.eq(grade))
            .filter(Column::Number.eq(number))
            .filter(Column::SubjectId.eq(subject_id))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询班级失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.assemble_class(model).await?)),
            None => Ok(None),
        }
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询班级失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.assemble_class(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassQueryParams,
    ) -> Result<ClassListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Classes::find();

        if let Some(grade) = query.grade {
            select = select.filter(Column::Grade.eq(grade));
        }

        if let Some(number) = query.number {
            select = select.filter(Column::Number.eq(number));
        }

        // 专业/学院按名称过滤，先解析成 ID 集合再下推
        if let Some(ref subject) = query.subject {
            let subject_ids: Vec<i64> = Subjects::find()
                .filter(SubjectColumn::Name.eq(subject.as_str()))
                .all(&self.db)
                .await
                .map_err(|e| AwardSysError::database_operation(format!("查询专业失败: {e}")))?
                .into_iter()
                .map(|s| s.id)
                .collect();
            select = select.filter(Column::SubjectId.is_in(subject_ids));
        }

        if let Some(ref college) = query.college {
            let college_obj = self.get_college_by_name_impl(college).await?;
            let subject_ids: Vec<i64> = match college_obj {
                Some(c) => Subjects::find()
                    .filter(SubjectColumn::CollegeId.eq(c.id))
                    .all(&self.db)
                    .await
                    .map_err(|e| {
                        AwardSysError::database_operation(format!("查询专业失败: {e}"))
                    })?
                    .into_iter()
                    .map(|s| s.id)
                    .collect(),
                None => Vec::new(),
            };
            select = select.filter(Column::SubjectId.is_in(subject_ids));
        }

        select = select
            .order_by_asc(Column::Grade)
            .order_by_asc(Column::Number);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询班级总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询班级页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询班级列表失败: {e}")))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(self.assemble_class(model).await?);
        }

        Ok(ClassListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新班级
    pub async fn update_class_impl(
        &self,
        id: i64,
        grade: Option<i32>,
        number: Option<i32>,
        subject_id: Option<i64>,
    ) -> Result<Option<Class>> {
        let existing = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询班级失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(grade) = grade {
            model.grade = Set(grade);
        }

        if let Some(number) = number {
            model.number = Set(number);
        }

        if let Some(subject_id) = subject_id {
            model.subject_id = Set(subject_id);
        }

        model.update(&self.db).await?;

        self.get_class_by_id_impl(id).await
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
