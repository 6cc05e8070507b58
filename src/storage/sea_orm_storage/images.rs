//! 附件存储操作

use super::SeaOrmStorage;
use crate::entity::images::{ActiveModel, Column, Entity as Images};
use crate::errors::{AwardSysError, Result};
use crate::models::images::entities::{Image, ImageCategory};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 登记附件文件名
    ///
    /// 每条记录每个类别至多一行，已存在时覆盖文件名并返回旧文件名
    /// 供调用方从文件系统清理。
    pub async fn upsert_image_impl(
        &self,
        record_id: i64,
        category: ImageCategory,
        file: &str,
    ) -> Result<(Image, Option<String>)> {
        let existing = Images::find()
            .filter(Column::AwardRecordId.eq(record_id))
            .filter(Column::Category.eq(category.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询附件失败: {e}")))?;

        match existing {
            Some(model) => {
                let old_file = model.file.clone();
                let mut active: ActiveModel = model.into();
                active.file = Set(file.to_string());
                let updated = active.update(&self.db).await?;
                Ok((updated.into_image(), Some(old_file)))
            }
            None => {
                let model = ActiveModel {
                    category: Set(category.to_string()),
                    file: Set(file.to_string()),
                    award_record_id: Set(record_id),
                    ..Default::default()
                };
                let inserted = model.insert(&self.db).await?;
                Ok((inserted.into_image(), None))
            }
        }
    }

    /// 列出记录的全部附件
    pub async fn list_images_by_record_impl(&self, record_id: i64) -> Result<Vec<Image>> {
        let models = Images::find()
            .filter(Column::AwardRecordId.eq(record_id))
            .order_by_asc(Column::Category)
            .all(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询附件失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_image()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::SeaOrmStorage;
    use crate::models::images::entities::ImageCategory;
    use crate::models::records::requests::CreateRecordData;
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

        storage
            .create_award_record_impl(CreateRecordData {
                works_name: None,
                award_level: "三等奖".to_string(),
                teacher_card_id: "T1001".to_string(),
                student_card_ids: vec!["S2023001".to_string()],
                main_student_card_id: "S2023001".to_string(),
                submit_user_id: user.id,
                update_time: 1_750_000_000,
                competition_name: "数学建模竞赛".to_string(),
                category: "学科竞赛".to_string(),
                hold_time: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
                organizer: "全国组委会".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[actix_web::test]
    async fn reupload_replaces_and_returns_old_file() {
        let storage = memory_storage().await;
        let record_id = seed_record(&storage).await;

        let (first, old) = storage
            .upsert_image_impl(record_id, ImageCategory::Notice, "1-NOTICE-a.png")
            .await
            .unwrap();
        assert!(old.is_none());

        let (second, old) = storage
            .upsert_image_impl(record_id, ImageCategory::Notice, "1-NOTICE-b.png")
            .await
            .unwrap();
        assert_eq!(old.as_deref(), Some("1-NOTICE-a.png"));
        assert_eq!(second.id, first.id);

        // 同类别只保留一行
        let images = storage.list_images_by_record_impl(record_id).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].file, "1-NOTICE-b.png");
    }

    #[actix_web::test]
    async fn categories_are_independent_slots() {
        let storage = memory_storage().await;
        let record_id = seed_record(&storage).await;

        storage
            .upsert_image_impl(record_id, ImageCategory::Notice, "1-NOTICE-a.png")
            .await
            .unwrap();
        storage
            .upsert_image_impl(record_id, ImageCategory::Award, "1-AWARD-b.png")
            .await
            .unwrap();
        storage
            .upsert_image_impl(record_id, ImageCategory::List, "1-LIST-c.png")
            .await
            .unwrap();

        let images = storage.list_images_by_record_impl(record_id).await.unwrap();
        assert_eq!(images.len(), 3);
    }
}
