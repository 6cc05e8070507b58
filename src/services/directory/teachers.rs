use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AwardSysError;
use crate::models::directory::requests::{
    DirectoryQueryParams, TeacherRequest, TeacherUpdateRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate::{validate_card_id, validate_person_name};

use super::DirectoryService;

pub async fn handle_list_teachers(
    service: &DirectoryService,
    query: DirectoryQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Teachers retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "查询教师列表失败")),
    }
}

pub async fn handle_create_teacher(
    service: &DirectoryService,
    teacher: TeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) =
        validate_card_id(&teacher.card_id).and_then(|_| validate_person_name(&teacher.name))
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg,
        )));
    }

    match storage.create_teacher(&teacher.card_id, &teacher.name).await {
        Ok(created) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            created,
            "Teacher created successfully",
        ))),
        Err(AwardSysError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::Conflict, "该工号已存在"),
        )),
        Err(e) => Ok(storage_error_response(&e, "创建教师失败")),
    }
}

pub async fn handle_update_teacher(
    service: &DirectoryService,
    card_id: String,
    teacher: TeacherUpdateRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_person_name(&teacher.name) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg,
        )));
    }

    match storage.update_teacher(&card_id, &teacher.name).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Teacher updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            format!("教师不存在: {card_id}"),
        ))),
        Err(e) => Ok(storage_error_response(&e, "更新教师失败")),
    }
}

pub async fn handle_delete_teacher(
    service: &DirectoryService,
    card_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_teacher(&card_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Teacher deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            format!("教师不存在: {card_id}"),
        ))),
        Err(e) => Ok(storage_error_response(&e, "删除教师失败")),
    }
}
