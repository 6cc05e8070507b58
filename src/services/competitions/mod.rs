pub mod competitions;
pub mod rating_infos;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::competitions::requests::{
    CompetitionQueryParams, CompetitionRequest, CompetitionUpdateRequest, RatingInfoRequest,
};
use crate::storage::Storage;

/// 标准竞赛与评级条目管理（仅管理员）
pub struct CompetitionService {
    storage: Option<Arc<dyn Storage>>,
}

impl CompetitionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_competitions(
        &self,
        query: CompetitionQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        competitions::handle_list_competitions(self, query, request).await
    }

    pub async fn create_competition(
        &self,
        competition: CompetitionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        competitions::handle_create_competition(self, competition, request).await
    }

    pub async fn update_competition(
        &self,
        name: String,
        update: CompetitionUpdateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        competitions::handle_update_competition(self, name, update, request).await
    }

    pub async fn delete_competition(
        &self,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        competitions::handle_delete_competition(self, name, request).await
    }

    pub async fn list_rating_infos(
        &self,
        query: CompetitionQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        rating_infos::handle_list_rating_infos(self, query, request).await
    }

    // 批量导入评级条目（按竞赛名覆盖）
    pub async fn batch_rating_infos(
        &self,
        rows: Vec<RatingInfoRequest>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        rating_infos::handle_batch_rating_infos(self, rows, request).await
    }

    pub async fn delete_rating_info(
        &self,
        competition_name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        rating_infos::handle_delete_rating_info(self, competition_name, request).await
    }
}
