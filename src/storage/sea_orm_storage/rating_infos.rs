//! 评级信息存储操作

use super::SeaOrmStorage;
use crate::entity::rating_infos::{ActiveModel, Column, Entity as RatingInfos};
use crate::errors::{AwardSysError, Result};
use crate::models::{
    PaginationInfo,
    competitions::{
        entities::RatingInfo, requests::CompetitionQueryParams, responses::RatingInfoListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 通过竞赛名获取评级条目
    pub async fn get_rating_info_by_name_impl(
        &self,
        competition_name: &str,
    ) -> Result<Option<RatingInfo>> {
        let result = RatingInfos::find_by_id(competition_name.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询评级失败: {e}")))?;

        Ok(result.map(|m| m.into_rating_info()))
    }

    /// 分页列出评级条目
    pub async fn list_rating_infos_with_pagination_impl(
        &self,
        query: CompetitionQueryParams,
    ) -> Result<RatingInfoListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = RatingInfos::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::CompetitionName.contains(&escaped));
        }

        if let Some(ref category) = query.category {
            select = select.filter(Column::Category.eq(category.as_str()));
        }

        select = select.order_by_asc(Column::CompetitionName);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询评级总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询评级页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询评级列表失败: {e}")))?;

        Ok(RatingInfoListResponse {
            rating_infos: models.into_iter().map(|m| m.into_rating_info()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 按竞赛名覆盖评级条目（批量导入语义），返回是否新建
    pub async fn upsert_rating_info_impl(
        &self,
        competition_name: &str,
        category: &str,
        level_title: &str,
        level: i32,
    ) -> Result<bool> {
        let existing = RatingInfos::find_by_id(competition_name.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("查询评级失败: {e}")))?;

        match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.category = Set(category.to_string());
                active.level_title = Set(level_title.to_string());
                active.level = Set(level);
                active.update(&self.db).await?;
                Ok(false)
            }
            None => {
                let model = ActiveModel {
                    competition_name: Set(competition_name.to_string()),
                    category: Set(category.to_string()),
                    level_title: Set(level_title.to_string()),
                    level: Set(level),
                };
                model.insert(&self.db).await?;
                Ok(true)
            }
        }
    }

    /// 删除评级条目（引用它的竞赛外键置空）
    pub async fn delete_rating_info_impl(&self, competition_name: &str) -> Result<bool> {
        let result = RatingInfos::delete_by_id(competition_name.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("删除评级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::SeaOrmStorage;

    async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::new_with_url(":memory:")
            .await
            .expect("内存库初始化失败")
    }

    #[actix_web::test]
    async fn upsert_creates_then_overwrites() {
        let storage = memory_storage().await;

        let created = storage
            .upsert_rating_info_impl("挑战杯", "A类赛事", "国家级特等", 1)
            .await
            .unwrap();
        assert!(created);

        // 同名再导入是覆盖而不是新建
        let created = storage
            .upsert_rating_info_impl("挑战杯", "A类赛事", "国家级一等", 2)
            .await
            .unwrap();
        assert!(!created);

        let info = storage
            .get_rating_info_by_name_impl("挑战杯")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(info.level_title, "国家级一等");
        assert_eq!(info.level, 2);
    }

    #[actix_web::test]
    async fn delete_rating_info_by_name() {
        let storage = memory_storage().await;
        storage
            .upsert_rating_info_impl("挑战杯", "A类赛事", "国家级特等", 1)
            .await
            .unwrap();

        assert!(storage.delete_rating_info_impl("挑战杯").await.unwrap());
        assert!(!storage.delete_rating_info_impl("挑战杯").await.unwrap());
    }
}
