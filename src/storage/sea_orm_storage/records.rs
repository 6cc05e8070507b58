//! 获奖记录存储操作
//!
//! 记录、竞赛快照、审核三者在同一事务内创建；提交者更新记录时
//! 同一事务内重置审核状态为待审。

use super::SeaOrmStorage;
use crate::entity::award_record_students::Column as RelationColumn;
use crate::entity::award_records::{ActiveModel, Column, Entity as AwardRecords};
use crate::entity::competition_records::Column as SnapshotColumn;
use crate::entity::prelude::{
    AwardRecordModel, AwardRecordStudentActiveModel, AwardRecordStudents, CompetitionRecordActiveModel,
    CompetitionRecords, Images, ReviewActiveModel, Reviews, Students, Teachers,
};
use crate::entity::reviews::Column as ReviewColumn;
use crate::entity::students::Column as StudentColumn;
use crate::entity::teachers::Column as TeacherColumn;
use crate::errors::{AwardSysError, Result};
use crate::models::{
    PaginationInfo,
    records::{
        requests::{CreateRecordData, RecordListQuery, UpdateRecordData},
        responses::{RecordDetail, RecordListResponse},
    },
    reviews::entities::ReviewStatus,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    // 按学号批量解析学生 ID，任何一个缺失即报 NotFound
    async fn resolve_student_ids(&self, card_ids: &[String]) -> Result<Vec<i64>> {
        let mut ids = Vec::with_capacity(card_ids.len());
        for card_id in card_ids {
            let student = Students::find()
                .filter(StudentColumn::CardId.eq(card_id.as_str()))
                .one(&self.db)
                .await
                .map_err(|e| AwardSysError::database_operation(format!("查询学生失败: {e}")))?
                .ok_or_else(|| AwardSysError::not_found(format!("学生不存在: {card_id}")))?;
            ids.push(student.id);
        }
        Ok(ids)
    }

    async fn resolve_teacher_id(&self, card_id: &str) -> Result<i64> {
        let teacher = Teachers::find()
            .filter(TeacherColumn::CardId.eq(card_id))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询教师失败: {e}")))?
            .ok_or_else(|| AwardSysError::not_found(format!("教师不存在: {card_id}")))?;
        Ok(teacher.id)
    }

    // 组装记录详情视图：目录档案、竞赛快照、评级投影、审核状态与附件
    async fn assemble_record(&self, model: AwardRecordModel) -> Result<RecordDetail> {
        let record_id = model.id;

        // 竞赛快照与记录同生同灭，缺失说明数据已损坏
        let snapshot = CompetitionRecords::find()
            .filter(SnapshotColumn::AwardRecordId.eq(record_id))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询竞赛快照失败: {e}")))?
            .ok_or_else(|| {
                AwardSysError::database_operation(format!("记录 {record_id} 缺少竞赛快照"))
            })?;

        let review_status = self
            .get_review_status_impl(record_id)
            .await?
            .unwrap_or(ReviewStatus::Waiting);

        // 指导教师与主力学生档案
        let teacher = match model.teacher_id {
            Some(id) => Teachers::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| AwardSysError::database_operation(format!("查询教师失败: {e}")))?,
            None => None,
        };

        let main_student = match model.main_student_id {
            Some(id) => Students::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| AwardSysError::database_operation(format!("查询学生失败: {e}")))?,
            None => None,
        };

        // 参与学生列表
        let relations = AwardRecordStudents::find()
            .filter(RelationColumn::AwardRecordId.eq(record_id))
            .all(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询参与学生失败: {e}")))?;

        let mut students = Vec::with_capacity(relations.len());
        let mut students_info = Vec::with_capacity(relations.len());
        for relation in &relations {
            if let Some(student) = Students::find_by_id(relation.student_id)
                .one(&self.db)
                .await
                .map_err(|e| AwardSysError::database_operation(format!("查询学生失败: {e}")))?
            {
                students.push(student.card_id.clone());
                students_info.push(self.assemble_student(student).await?);
            }
        }

        // 评级投影：仅当快照已挂接标准竞赛且竞赛带评级条目时出现
        let (rating_category, rating_level_title, rating_level) = match &snapshot.competition_name {
            Some(name) => match self.get_competition_by_name_impl(name).await? {
                Some(competition) => (
                    competition.rating_category,
                    competition.rating_level_title,
                    competition.rating_level,
                ),
                None => (None, None, None),
            },
            None => (None, None, None),
        };

        let images = self.list_images_by_record_impl(record_id).await?;

        let main_student_info = match main_student {
            Some(m) => Some(self.assemble_student(m.clone()).await?),
            None => None,
        };

        Ok(RecordDetail {
            id: record_id,
            works_name: model.works_name,
            award_level: model.award_level,
            update_time: model.update_time,
            submit_user: model.submit_user_id,
            teacher: teacher.as_ref().map(|t| t.card_id.clone()),
            teacher_info: teacher.map(|t| t.into_teacher()),
            students,
            students_info,
            main_student: main_student_info.as_ref().map(|m| m.card_id.clone()),
            main_student_info,
            competition_name: snapshot.name,
            competition_category: snapshot.category,
            hold_time: snapshot.hold_time,
            organizer: snapshot.organizer,
            competition: snapshot.competition_name,
            review_status,
            rating_category,
            rating_level_title,
            rating_level,
            images,
        })
    }

    /// 创建获奖记录：记录 + 参与学生关联 + 竞赛快照 + 待审审核，单事务落库
    pub async fn create_award_record_impl(&self, data: CreateRecordData) -> Result<RecordDetail> {
        let teacher_id = self.resolve_teacher_id(&data.teacher_card_id).await?;
        let student_ids = self.resolve_student_ids(&data.student_card_ids).await?;
        let main_index = data
            .student_card_ids
            .iter()
            .position(|c| c == &data.main_student_card_id)
            .ok_or_else(|| {
                AwardSysError::validation("主力学生必须出现在参与学生列表中".to_string())
            })?;
        let main_student_id = student_ids[main_index];

        let txn = self.db.begin().await?;

        let record = ActiveModel {
            works_name: Set(data.works_name),
            award_level: Set(data.award_level),
            update_time: Set(data.update_time),
            teacher_id: Set(Some(teacher_id)),
            main_student_id: Set(Some(main_student_id)),
            submit_user_id: Set(Some(data.submit_user_id)),
            ..Default::default()
        };
        let record = record.insert(&txn).await?;

        for student_id in &student_ids {
            let relation = AwardRecordStudentActiveModel {
                award_record_id: Set(record.id),
                student_id: Set(*student_id),
                is_principal: Set(*student_id == main_student_id),
                ..Default::default()
            };
            relation.insert(&txn).await?;
        }

        let snapshot = CompetitionRecordActiveModel {
            name: Set(data.competition_name),
            category: Set(data.category),
            hold_time: Set(data.hold_time),
            organizer: Set(data.organizer),
            award_record_id: Set(record.id),
            competition_name: Set(None),
            ..Default::default()
        };
        snapshot.insert(&txn).await?;

        let review = ReviewActiveModel {
            status: Set(ReviewStatus::Waiting.to_string()),
            award_record_id: Set(record.id),
            ..Default::default()
        };
        review.insert(&txn).await?;

        txn.commit().await?;

        self.assemble_record(record).await
    }

    /// 获取记录详情
    pub async fn get_record_detail_impl(&self, id: i64) -> Result<Option<RecordDetail>> {
        let result = AwardRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询记录失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.assemble_record(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出记录
    pub async fn list_records_with_pagination_impl(
        &self,
        query: RecordListQuery,
    ) -> Result<RecordListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = AwardRecords::find();

        if let Some(submit_user) = query.submit_user {
            select = select.filter(Column::SubmitUserId.eq(submit_user));
        }

        if let Some(from) = query.update_time_from {
            select = select.filter(Column::UpdateTime.gte(from));
        }

        if let Some(to) = query.update_time_to {
            select = select.filter(Column::UpdateTime.lte(to));
        }

        // 审核状态过滤先解析成记录 ID 集合再下推
        if let Some(status) = query.review_status {
            let record_ids: Vec<i64> = Reviews::find()
                .filter(ReviewColumn::Status.eq(status.to_string()))
                .all(&self.db)
                .await
                .map_err(|e| AwardSysError::database_operation(format!("查询审核失败: {e}")))?
                .into_iter()
                .map(|r| r.award_record_id)
                .collect();
            select = select.filter(Column::Id.is_in(record_ids));
        }

        // 作品名 / 快照竞赛名模糊搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            let snapshot_ids: Vec<i64> = CompetitionRecords::find()
                .filter(SnapshotColumn::Name.contains(&escaped))
                .all(&self.db)
                .await
                .map_err(|e| AwardSysError::database_operation(format!("查询竞赛快照失败: {e}")))?
                .into_iter()
                .map(|s| s.award_record_id)
                .collect();
            select = select.filter(
                Condition::any()
                    .add(Column::WorksName.contains(&escaped))
                    .add(Column::Id.is_in(snapshot_ids)),
            );
        }

        select = select.order_by_desc(Column::UpdateTime);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询记录总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询记录页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询记录列表失败: {e}")))?;

        let mut records = Vec::with_capacity(models.len());
        for model in models {
            records.push(self.assemble_record(model).await?);
        }

        Ok(RecordListResponse {
            records,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 部分更新记录，同一事务内重置审核为待审
    pub async fn update_award_record_impl(
        &self,
        id: i64,
        data: UpdateRecordData,
    ) -> Result<Option<RecordDetail>> {
        let existing = AwardRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询记录失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        // 目录引用在事务外解析，缺失即失败且不产生任何写入
        let teacher_id = match &data.teacher_card_id {
            Some(card_id) => Some(self.resolve_teacher_id(card_id).await?),
            None => None,
        };

        let student_ids = match &data.student_card_ids {
            Some(card_ids) => Some(self.resolve_student_ids(card_ids).await?),
            None => None,
        };

        let main_student_id = match &data.main_student_card_id {
            Some(card_id) => {
                let ids = self.resolve_student_ids(std::slice::from_ref(card_id)).await?;
                Some(ids[0])
            }
            None => None,
        };

        let txn = self.db.begin().await?;

        let mut record = ActiveModel {
            id: Set(id),
            update_time: Set(data.update_time),
            ..Default::default()
        };

        if let Some(works_name) = data.works_name {
            record.works_name = Set(Some(works_name));
        }
        if let Some(award_level) = data.award_level {
            record.award_level = Set(award_level);
        }
        if let Some(teacher_id) = teacher_id {
            record.teacher_id = Set(Some(teacher_id));
        }
        if let Some(main_student_id) = main_student_id {
            record.main_student_id = Set(Some(main_student_id));
        }

        let record = record.update(&txn).await?;

        // 参与学生整体替换
        if let Some(student_ids) = student_ids {
            AwardRecordStudents::delete_many()
                .filter(RelationColumn::AwardRecordId.eq(id))
                .exec(&txn)
                .await?;

            let principal = record.main_student_id;
            for student_id in student_ids {
                let relation = AwardRecordStudentActiveModel {
                    award_record_id: Set(id),
                    student_id: Set(student_id),
                    is_principal: Set(Some(student_id) == principal),
                    ..Default::default()
                };
                relation.insert(&txn).await?;
            }
        }

        // 竞赛快照部分更新，未提供的字段保留旧值
        if data.competition_name.is_some()
            || data.category.is_some()
            || data.hold_time.is_some()
            || data.organizer.is_some()
        {
            let snapshot = CompetitionRecords::find()
                .filter(SnapshotColumn::AwardRecordId.eq(id))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    AwardSysError::database_operation(format!("记录 {id} 缺少竞赛快照"))
                })?;

            let mut snapshot: CompetitionRecordActiveModel = snapshot.into();
            if let Some(name) = data.competition_name {
                snapshot.name = Set(name);
            }
            if let Some(category) = data.category {
                snapshot.category = Set(category);
            }
            if let Some(hold_time) = data.hold_time {
                snapshot.hold_time = Set(hold_time);
            }
            if let Some(organizer) = data.organizer {
                snapshot.organizer = Set(organizer);
            }
            snapshot.update(&txn).await?;
        }

        // 任何字段变更都强制回到待审
        Reviews::update_many()
            .col_expr(
                ReviewColumn::Status,
                sea_orm::sea_query::Expr::value(ReviewStatus::Waiting.to_string()),
            )
            .filter(ReviewColumn::AwardRecordId.eq(id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        self.get_record_detail_impl(id).await
    }

    /// 删除记录，返回其附件文件名供文件系统清理
    pub async fn delete_award_record_impl(&self, id: i64) -> Result<Option<Vec<String>>> {
        let existing = AwardRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询记录失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        let files: Vec<String> = Images::find()
            .filter(crate::entity::images::Column::AwardRecordId.eq(id))
            .all(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询附件失败: {e}")))?
            .into_iter()
            .map(|i| i.file)
            .collect();

        // 关联行（快照、审核、附件、参与学生）由外键级联删除
        AwardRecords::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("删除记录失败: {e}")))?;

        Ok(Some(files))
    }
}

#[cfg(test)]
mod tests {
    use super::SeaOrmStorage;
    use crate::errors::AwardSysError;
    use crate::models::images::entities::ImageCategory;
    use crate::models::records::requests::{CreateRecordData, UpdateRecordData};
    use crate::models::reviews::entities::ReviewStatus;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserData;
    use chrono::NaiveDate;

    async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::new_with_url(":memory:")
            .await
            .expect("内存库初始化失败")
    }

    // 填充目录档案和提交账号，返回提交账号 ID
    async fn seed_roster(storage: &SeaOrmStorage) -> i64 {
        storage
            .create_teacher_impl("T1001", "王老师")
            .await
            .unwrap();
        storage
            .create_student_impl("S2023001", "李明", None)
            .await
            .unwrap();
        storage
            .create_student_impl("S2023002", "赵华", None)
            .await
            .unwrap();
        let user = storage
            .create_user_impl(CreateUserData {
                username: "S2023001".to_string(),
                password_hash: "unused".to_string(),
                role: UserRole::Student,
                display_name: Some("李明".to_string()),
            })
            .await
            .unwrap();
        user.id
    }

    fn sample_record(submit_user_id: i64) -> CreateRecordData {
        CreateRecordData {
            works_name: Some("智能巡线小车".to_string()),
            award_level: "一等奖".to_string(),
            teacher_card_id: "T1001".to_string(),
            student_card_ids: vec!["S2023001".to_string(), "S2023002".to_string()],
            main_student_card_id: "S2023001".to_string(),
            submit_user_id,
            update_time: 1_750_000_000,
            competition_name: "全国大学生智能车竞赛".to_string(),
            category: "学科竞赛".to_string(),
            hold_time: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            organizer: "教育部高教司".to_string(),
        }
    }

    #[actix_web::test]
    async fn create_record_snapshots_and_starts_waiting() {
        let storage = memory_storage().await;
        let user_id = seed_roster(&storage).await;

        let detail = storage
            .create_award_record_impl(sample_record(user_id))
            .await
            .unwrap();

        assert_eq!(detail.review_status, ReviewStatus::Waiting);
        assert_eq!(detail.competition_name, "全国大学生智能车竞赛");
        assert_eq!(detail.competition, None);
        assert_eq!(detail.teacher.as_deref(), Some("T1001"));
        assert_eq!(detail.students.len(), 2);
        assert_eq!(detail.main_student.as_deref(), Some("S2023001"));
        assert_eq!(detail.submit_user, Some(user_id));
    }

    #[actix_web::test]
    async fn create_record_rejects_unknown_student() {
        let storage = memory_storage().await;
        let user_id = seed_roster(&storage).await;

        let mut data = sample_record(user_id);
        data.student_card_ids.push("S9999999".to_string());

        let result = storage.create_award_record_impl(data).await;
        assert!(matches!(result, Err(AwardSysError::NotFound(_))));
    }

    #[actix_web::test]
    async fn create_record_requires_main_student_in_list() {
        let storage = memory_storage().await;
        let user_id = seed_roster(&storage).await;

        let mut data = sample_record(user_id);
        data.main_student_card_id = "S2023999".to_string();

        let result = storage.create_award_record_impl(data).await;
        assert!(matches!(result, Err(AwardSysError::Validation(_))));
    }

    #[actix_web::test]
    async fn update_record_resets_review_to_waiting() {
        let storage = memory_storage().await;
        let user_id = seed_roster(&storage).await;
        let detail = storage
            .create_award_record_impl(sample_record(user_id))
            .await
            .unwrap();

        storage
            .set_review_status_impl(detail.id, ReviewStatus::Passed)
            .await
            .unwrap();

        let updated = storage
            .update_award_record_impl(
                detail.id,
                UpdateRecordData {
                    award_level: Some("特等奖".to_string()),
                    update_time: 1_750_000_100,
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.award_level, "特等奖");
        assert_eq!(updated.review_status, ReviewStatus::Waiting);
    }

    #[actix_web::test]
    async fn update_record_replaces_student_list() {
        let storage = memory_storage().await;
        let user_id = seed_roster(&storage).await;
        let detail = storage
            .create_award_record_impl(sample_record(user_id))
            .await
            .unwrap();

        let updated = storage
            .update_award_record_impl(
                detail.id,
                UpdateRecordData {
                    student_card_ids: Some(vec!["S2023002".to_string()]),
                    main_student_card_id: Some("S2023002".to_string()),
                    update_time: 1_750_000_200,
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.students, vec!["S2023002".to_string()]);
        assert_eq!(updated.main_student.as_deref(), Some("S2023002"));
    }

    #[actix_web::test]
    async fn delete_record_returns_attachment_files() {
        let storage = memory_storage().await;
        let user_id = seed_roster(&storage).await;
        let detail = storage
            .create_award_record_impl(sample_record(user_id))
            .await
            .unwrap();

        storage
            .upsert_image_impl(detail.id, ImageCategory::Notice, "1-NOTICE-a.png")
            .await
            .unwrap();
        storage
            .upsert_image_impl(detail.id, ImageCategory::Award, "1-AWARD-b.png")
            .await
            .unwrap();

        let files = storage
            .delete_award_record_impl(detail.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(files.len(), 2);

        assert!(
            storage
                .get_record_detail_impl(detail.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn delete_missing_record_returns_none() {
        let storage = memory_storage().await;
        assert!(storage.delete_award_record_impl(404).await.unwrap().is_none());
    }
}
