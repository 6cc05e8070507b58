use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AwardSysError;
use crate::models::directory::requests::{CollegeRequest, DirectoryQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate::validate_directory_name;

use super::DirectoryService;

pub async fn handle_list_colleges(
    service: &DirectoryService,
    query: DirectoryQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_colleges_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Colleges retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "查询学院列表失败")),
    }
}

pub async fn handle_create_college(
    service: &DirectoryService,
    college: CollegeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_directory_name(&college.name) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg,
        )));
    }

    match storage.create_college(&college.name).await {
        Ok(created) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            created,
            "College created successfully",
        ))),
        Err(AwardSysError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::Conflict, "同名学院已存在"),
        )),
        Err(e) => Ok(storage_error_response(&e, "创建学院失败")),
    }
}

pub async fn handle_update_college(
    service: &DirectoryService,
    name: String,
    college: CollegeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_directory_name(&college.name) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg,
        )));
    }

    let existing = match storage.get_college_by_name(&name).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CollegeNotFound,
                format!("学院不存在: {name}"),
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询学院失败")),
    };

    match storage.update_college(existing.id, &college.name).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "College updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CollegeNotFound,
            format!("学院不存在: {name}"),
        ))),
        Err(AwardSysError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::Conflict, "同名学院已存在"),
        )),
        Err(e) => Ok(storage_error_response(&e, "更新学院失败")),
    }
}

pub async fn handle_delete_college(
    service: &DirectoryService,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_college_by_name(&name).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CollegeNotFound,
                format!("学院不存在: {name}"),
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询学院失败")),
    };

    match storage.delete_college(existing.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "College deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CollegeNotFound,
            format!("学院不存在: {name}"),
        ))),
        Err(e) => Ok(storage_error_response(&e, "删除学院失败")),
    }
}
