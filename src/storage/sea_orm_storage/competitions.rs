//! 标准竞赛存储操作

use super::SeaOrmStorage;
use crate::entity::competitions::{ActiveModel, Column, Entity as Competitions};
use crate::entity::prelude::{CompetitionModel, RatingInfos};
use crate::errors::{AwardSysError, Result};
use crate::models::{
    PaginationInfo,
    competitions::{
        entities::Competition,
        requests::{CompetitionQueryParams, CompetitionRequest, CompetitionUpdateRequest},
        responses::CompetitionListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    // 展开评级投影
    async fn assemble_competition(&self, model: CompetitionModel) -> Result<Competition> {
        let rating = match &model.rating_competition_name {
            Some(name) => RatingInfos::find_by_id(name.clone())
                .one(&self.db)
                .await
                .map_err(|e| AwardSysError::database_operation(format!("查询评级失败: {e}")))?
                .map(|m| m.into_rating_info()),
            None => None,
        };

        let competition = Competition {
            name: model.name,
            category: model.category,
            hold_time: model.hold_time,
            organizer: model.organizer,
            rating_info: model.rating_competition_name,
            rating_category: None,
            rating_level_title: None,
            rating_level: None,
        };

        Ok(competition.with_rating(rating.as_ref()))
    }

    /// 创建标准竞赛（名称即主键，并发重名由唯一约束上报 Conflict）
    pub async fn create_competition_impl(&self, data: CompetitionRequest) -> Result<Competition> {
        let model = ActiveModel {
            name: Set(data.name),
            category: Set(data.category),
            hold_time: Set(data.hold_time),
            organizer: Set(data.organizer),
            rating_competition_name: Set(data.rating_info),
        };

        let result = model.insert(&self.db).await?;

        self.assemble_competition(result).await
    }

    /// 通过名称获取标准竞赛
    pub async fn get_competition_by_name_impl(&self, name: &str) -> Result<Option<Competition>> {
        let result = Competitions::find_by_id(name.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询竞赛失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.assemble_competition(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出标准竞赛
    pub async fn list_competitions_with_pagination_impl(
        &self,
        query: CompetitionQueryParams,
    ) -> Result<CompetitionListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Competitions::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        if let Some(ref category) = query.category {
            select = select.filter(Column::Category.eq(category.as_str()));
        }

        select = select.order_by_asc(Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询竞赛总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询竞赛页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询竞赛列表失败: {e}")))?;

        let mut competitions = Vec::with_capacity(models.len());
        for model in models {
            competitions.push(self.assemble_competition(model).await?);
        }

        Ok(CompetitionListResponse {
            competitions,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新标准竞赛（名称是主键，不可改名）
    pub async fn update_competition_impl(
        &self,
        name: &str,
        update: CompetitionUpdateRequest,
    ) -> Result<Option<Competition>> {
        let existing = Competitions::find_by_id(name.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询竞赛失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        if let Some(category) = update.category {
            model.category = Set(category);
        }
        if let Some(hold_time) = update.hold_time {
            model.hold_time = Set(hold_time);
        }
        if let Some(organizer) = update.organizer {
            model.organizer = Set(organizer);
        }
        if let Some(rating_info) = update.rating_info {
            model.rating_competition_name = Set(Some(rating_info));
        }

        model.update(&self.db).await?;

        self.get_competition_by_name_impl(name).await
    }

    /// 删除标准竞赛（引用它的快照外键置空）
    pub async fn delete_competition_impl(&self, name: &str) -> Result<bool> {
        let result = Competitions::delete_by_id(name.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("删除竞赛失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::SeaOrmStorage;
    use crate::errors::AwardSysError;
    use crate::models::competitions::requests::{CompetitionRequest, CompetitionUpdateRequest};
    use chrono::NaiveDate;

    async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::new_with_url(":memory:")
            .await
            .expect("内存库初始化失败")
    }

    fn sample_competition(name: &str) -> CompetitionRequest {
        CompetitionRequest {
            name: name.to_string(),
            category: "学科竞赛".to_string(),
            hold_time: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            organizer: "中国计算机学会".to_string(),
            rating_info: None,
        }
    }

    #[actix_web::test]
    async fn duplicate_competition_name_conflicts() {
        let storage = memory_storage().await;

        storage
            .create_competition_impl(sample_competition("CCSP"))
            .await
            .unwrap();
        let result = storage
            .create_competition_impl(sample_competition("CCSP"))
            .await;

        assert!(matches!(result, Err(AwardSysError::Conflict(_))));
    }

    #[actix_web::test]
    async fn competition_projects_linked_rating() {
        let storage = memory_storage().await;

        storage
            .upsert_rating_info_impl("CCSP", "A类赛事", "国家级银奖", 2)
            .await
            .unwrap();
        let mut request = sample_competition("CCSP");
        request.rating_info = Some("CCSP".to_string());

        let competition = storage.create_competition_impl(request).await.unwrap();
        assert_eq!(competition.rating_info.as_deref(), Some("CCSP"));
        assert_eq!(competition.rating_category.as_deref(), Some("A类赛事"));
        assert_eq!(competition.rating_level_title.as_deref(), Some("国家级银奖"));
        assert_eq!(competition.rating_level, Some(2));
    }

    #[actix_web::test]
    async fn update_competition_keeps_unset_fields() {
        let storage = memory_storage().await;
        storage
            .create_competition_impl(sample_competition("CCSP"))
            .await
            .unwrap();

        let updated = storage
            .update_competition_impl(
                "CCSP",
                CompetitionUpdateRequest {
                    organizer: Some("CCF".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.organizer, "CCF");
        assert_eq!(updated.category, "学科竞赛");

        assert!(
            storage
                .update_competition_impl("不存在", CompetitionUpdateRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn delete_competition_by_name() {
        let storage = memory_storage().await;
        storage
            .create_competition_impl(sample_competition("CCSP"))
            .await
            .unwrap();

        assert!(storage.delete_competition_impl("CCSP").await.unwrap());
        assert!(!storage.delete_competition_impl("CCSP").await.unwrap());
        assert!(
            storage
                .get_competition_by_name_impl("CCSP")
                .await
                .unwrap()
                .is_none()
        );
    }
}
