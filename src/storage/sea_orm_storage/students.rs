//! 学生存储操作

use super::SeaOrmStorage;
use crate::entity::classes::Column as ClassColumn;
use crate::entity::prelude::{Classes, StudentModel, Subjects};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::entity::subjects::Column as SubjectColumn;
use crate::errors::{AwardSysError, Result};
use crate::models::{
    PaginationInfo,
    directory::{entities::Student, requests::StudentQueryParams, responses::StudentListResponse},
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    // 组装带班级/专业/学院投影的学生视图
    pub(crate) async fn assemble_student(&self, model: StudentModel) -> Result<Student> {
        let mut student = Student {
            id: model.id,
            card_id: model.card_id,
            name: model.name,
            clazz: model.class_id,
            clazz_grade: None,
            clazz_number: None,
            subject: None,
            college: None,
        };

        if let Some(class_id) = model.class_id
            && let Some(class) = self.get_class_by_id_impl(class_id).await?
        {
            student.clazz_grade = Some(class.grade);
            student.clazz_number = Some(class.number);
            student.subject = Some(class.subject_name);
            student.college = Some(class.college_name);
        }

        Ok(student)
    }

    /// 创建学生（学号唯一）
    pub async fn create_student_impl(
        &self,
        card_id: &str,
        name: &str,
        class_id: Option<i64>,
    ) -> Result<Student> {
        let model = ActiveModel {
            card_id: Set(card_id.to_string()),
            name: Set(name.to_string()),
            class_id: Set(class_id),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        self.assemble_student(result).await
    }

    /// 通过学号获取学生
    pub async fn get_student_by_card_id_impl(&self, card_id: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::CardId.eq(card_id))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学生失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.assemble_student(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentQueryParams,
    ) -> Result<StudentListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Students::find();

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

        // 班级维度过滤先解析成班级 ID 集合再下推
        if query.clazz_grade.is_some()
            || query.clazz_number.is_some()
            || query.subject.is_some()
            || query.college.is_some()
        {
            let mut class_select = Classes::find();

            if let Some(grade) = query.clazz_grade {
                class_select = class_select.filter(ClassColumn::Grade.eq(grade));
            }
            if let Some(number) = query.clazz_number {
                class_select = class_select.filter(ClassColumn::Number.eq(number));
            }
            if let Some(ref subject) = query.subject {
                let subject_ids: Vec<i64> = Subjects::find()
                    .filter(SubjectColumn::Name.eq(subject.as_str()))
                    .all(&self.db)
                    .await
                    .map_err(|e| {
                        AwardSysError::database_operation(format!("查询专业失败: {e}"))
                    })?
                    .into_iter()
                    .map(|s| s.id)
                    .collect();
                class_select = class_select.filter(ClassColumn::SubjectId.is_in(subject_ids));
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
                class_select = class_select.filter(ClassColumn::SubjectId.is_in(subject_ids));
            }

            let class_ids: Vec<i64> = class_select
                .all(&self.db)
                .await
                .map_err(|e| AwardSysError::database_operation(format!("查询班级失败: {e}")))?
                .into_iter()
                .map(|c| c.id)
                .collect();

            select = select.filter(Column::ClassId.is_in(class_ids));
        }

        select = select.order_by_asc(Column::CardId);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学生页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学生列表失败: {e}")))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(self.assemble_student(model).await?);
        }

        Ok(StudentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 按学号覆盖姓名与班级（批量导入语义：存在即覆盖，不存在即创建）
    pub async fn upsert_student_impl(
        &self,
        card_id: &str,
        name: &str,
        class_id: Option<i64>,
    ) -> Result<Student> {
        let existing = Students::find()
            .filter(Column::CardId.eq(card_id))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学生失败: {e}")))?;

        match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.name = Set(name.to_string());
                active.class_id = Set(class_id);
                let updated = active.update(&self.db).await?;
                self.assemble_student(updated).await
            }
            None => self.create_student_impl(card_id, name, class_id).await,
        }
    }

    /// 更新学生（`class_id` 外层 None 表示不修改，内层 None 表示清空班级）
    pub async fn update_student_impl(
        &self,
        card_id: &str,
        name: Option<String>,
        class_id: Option<Option<i64>>,
    ) -> Result<Option<Student>> {
        let existing = Students::find()
            .filter(Column::CardId.eq(card_id))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询学生失败: {e}")))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();

        if let Some(name) = name {
            active.name = Set(name);
        }

        if let Some(class_id) = class_id {
            active.class_id = Set(class_id);
        }

        let updated = active.update(&self.db).await?;

        Ok(Some(self.assemble_student(updated).await?))
    }

    /// 删除学生
    pub async fn delete_student_impl(&self, card_id: &str) -> Result<bool> {
        let result = Students::delete_many()
            .filter(Column::CardId.eq(card_id))
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 绑定登录账号
    pub async fn bind_student_user_impl(&self, card_id: &str, user_id: i64) -> Result<bool> {
        let result = Students::update_many()
            .col_expr(Column::UserId, sea_orm::sea_query::Expr::value(user_id))
            .filter(Column::CardId.eq(card_id))
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("绑定学生账号失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
