use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::directory::requests::{ClassQueryParams, ClassRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate::{validate_class_number, validate_grade};

use super::DirectoryService;

pub async fn handle_list_classes(
    service: &DirectoryService,
    query: ClassQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_classes_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Classes retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "查询班级列表失败")),
    }
}

pub async fn handle_create_class(
    service: &DirectoryService,
    class: ClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_grade(class.grade).and_then(|_| validate_class_number(class.number))
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg,
        )));
    }

    let subject = match storage.get_subject_by_name(&class.subject).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                format!("专业不存在: {}", class.subject),
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询专业失败")),
    };

    // 三元组唯一
    match storage
        .get_class_by_triple(class.grade, class.number, subject.id)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::Conflict,
                "相同年级班号的班级已存在",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_error_response(&e, "查询班级失败")),
    }

    match storage
        .create_class(class.grade, class.number, subject.id)
        .await
    {
        Ok(created) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            created,
            "Class created successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "创建班级失败")),
    }
}

pub async fn handle_update_class(
    service: &DirectoryService,
    class_id: i64,
    class: ClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_grade(class.grade).and_then(|_| validate_class_number(class.number))
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg,
        )));
    }

    let subject = match storage.get_subject_by_name(&class.subject).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                format!("专业不存在: {}", class.subject),
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询专业失败")),
    };

    match storage
        .update_class(
            class_id,
            Some(class.grade),
            Some(class.number),
            Some(subject.id),
        )
        .await
    {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Class updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "班级不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e, "更新班级失败")),
    }
}

pub async fn handle_delete_class(
    service: &DirectoryService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_class(class_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Class deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "班级不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e, "删除班级失败")),
    }
}
