use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AwardSysError;
use crate::models::directory::requests::{DirectoryQueryParams, SubjectRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate::validate_directory_name;

use super::DirectoryService;

pub async fn handle_list_subjects(
    service: &DirectoryService,
    query: DirectoryQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "查询专业列表失败")),
    }
}

pub async fn handle_create_subject(
    service: &DirectoryService,
    subject: SubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_directory_name(&subject.name) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg,
        )));
    }

    let college = match storage.get_college_by_name(&subject.college).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CollegeNotFound,
                format!("学院不存在: {}", subject.college),
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询学院失败")),
    };

    match storage.create_subject(&subject.name, college.id).await {
        Ok(created) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            created,
            "Subject created successfully",
        ))),
        Err(AwardSysError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::Conflict, "同名专业已存在"),
        )),
        Err(e) => Ok(storage_error_response(&e, "创建专业失败")),
    }
}

pub async fn handle_update_subject(
    service: &DirectoryService,
    name: String,
    subject: SubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_directory_name(&subject.name) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg,
        )));
    }

    let existing = match storage.get_subject_by_name(&name).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                format!("专业不存在: {name}"),
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询专业失败")),
    };

    let college = match storage.get_college_by_name(&subject.college).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CollegeNotFound,
                format!("学院不存在: {}", subject.college),
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询学院失败")),
    };

    match storage
        .update_subject(existing.id, Some(subject.name), Some(college.id))
        .await
    {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Subject updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            format!("专业不存在: {name}"),
        ))),
        Err(AwardSysError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::Conflict, "同名专业已存在"),
        )),
        Err(e) => Ok(storage_error_response(&e, "更新专业失败")),
    }
}

pub async fn handle_delete_subject(
    service: &DirectoryService,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_subject_by_name(&name).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                format!("专业不存在: {name}"),
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询专业失败")),
    };

    match storage.delete_subject(existing.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Subject deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            format!("专业不存在: {name}"),
        ))),
        Err(e) => Ok(storage_error_response(&e, "删除专业失败")),
    }
}
