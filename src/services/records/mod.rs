pub mod create;
pub mod delete;
pub mod detail;
pub mod export;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::records::requests::{CreateRecordRequest, RecordListQuery, UpdateRecordRequest};
use crate::storage::Storage;

pub struct RecordService {
    storage: Option<Arc<dyn Storage>>,
}

impl RecordService {
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

    // 提交获奖记录（记录 + 竞赛快照 + 待审审核单一起落库）
    pub async fn create_record(
        &self,
        create_request: CreateRecordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_record(self, create_request, request).await
    }

    // 分页列出记录（学生只能看到自己提交的）
    pub async fn list_records(
        &self,
        query: RecordListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_records(self, query, request).await
    }

    // 记录详情
    pub async fn get_record(
        &self,
        record_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::handle_get_record(self, record_id, request).await
    }

    // 修改记录（仅提交者本人，审核状态重置为待审）
    pub async fn update_record(
        &self,
        record_id: i64,
        update_request: UpdateRecordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_record(self, record_id, update_request, request).await
    }

    // 删除记录及其附件文件
    pub async fn delete_record(
        &self,
        record_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_record(self, record_id, request).await
    }

    // 导出获奖记录报表
    pub async fn export_records(
        &self,
        query: RecordListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::handle_export_records(self, query, request).await
    }
}
