use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AwardSysError;
use crate::models::directory::requests::{
    StudentQueryParams, StudentRequest, StudentUpdateRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate::{validate_card_id, validate_person_name};

use super::DirectoryService;

pub async fn handle_list_students(
    service: &DirectoryService,
    query: StudentQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_students_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "查询学生列表失败")),
    }
}

pub async fn handle_create_student(
    service: &DirectoryService,
    student: StudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) =
        validate_card_id(&student.card_id).and_then(|_| validate_person_name(&student.name))
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg,
        )));
    }

    // 显式给出班级时校验其存在
    if let Some(class_id) = student.clazz {
        match storage.get_class_by_id(class_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ClassNotFound,
                    format!("班级不存在: {class_id}"),
                )));
            }
            Err(e) => return Ok(storage_error_response(&e, "查询班级失败")),
        }
    }

    match storage
        .create_student(&student.card_id, &student.name, student.clazz)
        .await
    {
        Ok(created) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            created,
            "Student created successfully",
        ))),
        Err(AwardSysError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::Conflict, "该学号已存在"),
        )),
        Err(e) => Ok(storage_error_response(&e, "创建学生失败")),
    }
}

pub async fn handle_update_student(
    service: &DirectoryService,
    card_id: String,
    student: StudentUpdateRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_person_name(&student.name) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg,
        )));
    }

    if let Some(class_id) = student.clazz {
        match storage.get_class_by_id(class_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ClassNotFound,
                    format!("班级不存在: {class_id}"),
                )));
            }
            Err(e) => return Ok(storage_error_response(&e, "查询班级失败")),
        }
    }

    // 整行覆盖：clazz 为 null 时解除班级关联
    match storage
        .update_student(&card_id, Some(student.name), Some(student.clazz))
        .await
    {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            format!("学生不存在: {card_id}"),
        ))),
        Err(e) => Ok(storage_error_response(&e, "更新学生失败")),
    }
}

pub async fn handle_delete_student(
    service: &DirectoryService,
    card_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_student(&card_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Student deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            format!("学生不存在: {card_id}"),
        ))),
        Err(e) => Ok(storage_error_response(&e, "删除学生失败")),
    }
}
