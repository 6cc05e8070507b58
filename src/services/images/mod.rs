pub mod download;
pub mod list;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

/// 获奖记录附件服务。
///
/// 每条记录在每个类别（通知/奖状/名单）下至多一张附件，
/// 重复上传覆盖登记并删除旧文件。
pub struct ImageService {
    storage: Option<Arc<dyn Storage>>,
}

impl ImageService {
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

    pub async fn upload_image(
        &self,
        record_id: i64,
        category: String,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload_image(self, record_id, category, payload, request).await
    }

    pub async fn list_images(
        &self,
        record_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_images(self, record_id, request).await
    }

    pub async fn download_image(
        &self,
        record_id: i64,
        category: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        download::handle_download_image(self, record_id, category, request).await
    }
}
