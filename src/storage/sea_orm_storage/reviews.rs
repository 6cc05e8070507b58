//! 审核存储操作

use std::str::FromStr;

use super::SeaOrmStorage;
use crate::entity::competition_records::Column as SnapshotColumn;
use crate::entity::prelude::{CompetitionRecordActiveModel, CompetitionRecords, Reviews};
use crate::entity::reviews::Column;
use crate::errors::{AwardSysError, Result};
use crate::models::{competitions::entities::Competition, reviews::entities::ReviewStatus};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 获取记录的审核状态
    pub async fn get_review_status_impl(&self, record_id: i64) -> Result<Option<ReviewStatus>> {
        let result = Reviews::find()
            .filter(Column::AwardRecordId.eq(record_id))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询审核失败: {e}")))?;

        match result {
            Some(review) => {
                let status = ReviewStatus::from_str(&review.status).map_err(|e| {
                    AwardSysError::database_operation(format!("非法审核状态: {e}"))
                })?;
                Ok(Some(status))
            }
            None => Ok(None),
        }
    }

    /// 设置记录的审核状态
    pub async fn set_review_status_impl(
        &self,
        record_id: i64,
        status: ReviewStatus,
    ) -> Result<bool> {
        let result = Reviews::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .filter(Column::AwardRecordId.eq(record_id))
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("更新审核状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 把竞赛快照覆盖为标准竞赛的规范值并建立关联
    ///
    /// 审核通过时调用，标准数据有意覆盖提交时的自由文本。
    pub async fn link_competition_record_impl(
        &self,
        record_id: i64,
        competition: &Competition,
    ) -> Result<bool> {
        let snapshot = CompetitionRecords::find()
            .filter(SnapshotColumn::AwardRecordId.eq(record_id))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询竞赛快照失败: {e}")))?;

        let Some(snapshot) = snapshot else {
            return Ok(false);
        };

        let mut active: CompetitionRecordActiveModel = snapshot.into();
        active.name = Set(competition.name.clone());
        active.category = Set(competition.category.clone());
        active.hold_time = Set(competition.hold_time);
        active.organizer = Set(competition.organizer.clone());
        active.competition_name = Set(Some(competition.name.clone()));
        active.update(&self.db).await?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::SeaOrmStorage;
    use crate::models::competitions::requests::CompetitionRequest;
    use crate::models::records::requests::CreateRecordData;
    use crate::models::reviews::entities::ReviewStatus;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserData;
    use chrono::NaiveDate;

    async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::new_with_url(":memory:")
            .await
            .expect("内存库初始化失败")
    }

    async fn seed_record(storage: &SeaOrmStorage) -> i64 {
        storage
            .create_teacher_impl("T1001", "王老师")
            .await
            .unwrap();
        storage
            .create_student_impl("S2023001", "李明", None)
            .await
            .unwrap();
        let user = storage
            .create_user_impl(CreateUserData {
                username: "S2023001".to_string(),
                password_hash: "unused".to_string(),
                role: UserRole::Student,
                display_name: None,
            })
            .await
            .unwrap();

        let detail = storage
            .create_award_record_impl(CreateRecordData {
                works_name: None,
                award_level: "二等奖".to_string(),
                teacher_card_id: "T1001".to_string(),
                student_card_ids: vec!["S2023001".to_string()],
                main_student_card_id: "S2023001".to_string(),
                submit_user_id: user.id,
                update_time: 1_750_000_000,
                competition_name: "蓝桥杯（江苏赛区）".to_string(),
                category: "程序设计".to_string(),
                hold_time: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
                organizer: "工信部人才交流中心".to_string(),
            })
            .await
            .unwrap();
        detail.id
    }

    #[actix_web::test]
    async fn review_status_round_trip() {
        let storage = memory_storage().await;
        let record_id = seed_record(&storage).await;

        assert_eq!(
            storage.get_review_status_impl(record_id).await.unwrap(),
            Some(ReviewStatus::Waiting)
        );

        assert!(
            storage
                .set_review_status_impl(record_id, ReviewStatus::NotPass)
                .await
                .unwrap()
        );
        assert_eq!(
            storage.get_review_status_impl(record_id).await.unwrap(),
            Some(ReviewStatus::NotPass)
        );

        assert!(
            !storage
                .set_review_status_impl(404, ReviewStatus::Passed)
                .await
                .unwrap()
        );
    }

    #[actix_web::test]
    async fn link_competition_overwrites_snapshot_and_projects_rating() {
        let storage = memory_storage().await;
        let record_id = seed_record(&storage).await;

        storage
            .upsert_rating_info_impl("蓝桥杯", "A类赛事", "国家级一等", 1)
            .await
            .unwrap();
        let competition = storage
            .create_competition_impl(CompetitionRequest {
                name: "蓝桥杯".to_string(),
                category: "程序设计竞赛".to_string(),
                hold_time: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
                organizer: "工信部人才交流中心".to_string(),
                rating_info: Some("蓝桥杯".to_string()),
            })
            .await
            .unwrap();

        assert!(
            storage
                .link_competition_record_impl(record_id, &competition)
                .await
                .unwrap()
        );

        let detail = storage
            .get_record_detail_impl(record_id)
            .await
            .unwrap()
            .unwrap();
        // 快照的自由文本被标准竞赛的规范值覆盖
        assert_eq!(detail.competition_name, "蓝桥杯");
        assert_eq!(detail.competition_category, "程序设计竞赛");
        assert_eq!(detail.competition.as_deref(), Some("蓝桥杯"));
        assert_eq!(detail.rating_category.as_deref(), Some("A类赛事"));
        assert_eq!(detail.rating_level, Some(1));
    }

    #[actix_web::test]
    async fn link_competition_missing_record_returns_false() {
        let storage = memory_storage().await;
        let competition = storage
            .create_competition_impl(CompetitionRequest {
                name: "蓝桥杯".to_string(),
                category: "程序设计竞赛".to_string(),
                hold_time: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
                organizer: "工信部人才交流中心".to_string(),
                rating_info: None,
            })
            .await
            .unwrap();

        assert!(
            !storage
                .link_competition_record_impl(404, &competition)
                .await
                .unwrap()
        );
    }
}
