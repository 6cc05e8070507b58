use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::Path;

use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::images::entities::ImageCategory;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::ImageService;

// 按扩展名推断 Content-Type
fn content_type_for(file: &str) -> &'static str {
    match Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

pub async fn handle_download_image(
    service: &ImageService,
    record_id: i64,
    category: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let category: ImageCategory = match category.parse() {
        Ok(c) => c,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ImageCategoryInvalid,
                "附件类别必须是 NOTICE / AWARD / LIST 之一",
            )));
        }
    };

    let detail = match storage.get_record_detail(record_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RecordNotFound,
                "获奖记录不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询获奖记录失败")),
    };

    if RequireJWT::extract_user_role(request) == Some(UserRole::Student)
        && detail.submit_user != RequireJWT::extract_user_id(request)
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能查看自己提交记录的附件",
        )));
    }

    let image = match storage.list_images_by_record(record_id).await {
        Ok(images) => images.into_iter().find(|i| i.category == category),
        Err(e) => return Ok(storage_error_response(&e, "查询附件失败")),
    };

    let image = match image {
        Some(image) => image,
        None => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "该类别下没有附件",
            )));
        }
    };

    let path = Path::new(&AppConfig::get().upload.dir).join(&image.file);
    match std::fs::read(&path) {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type(content_type_for(&image.file))
            .insert_header((
                "Content-Disposition",
                format!("inline; filename=\"{}\"", image.file),
            ))
            .body(bytes)),
        Err(e) => {
            tracing::error!("读取附件文件 {} 失败: {}", image.file, e);
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "附件文件已丢失",
            )))
        }
    }
}
