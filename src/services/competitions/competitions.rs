use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AwardSysError;
use crate::models::competitions::requests::{
    CompetitionQueryParams, CompetitionRequest, CompetitionUpdateRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::CompetitionService;

pub async fn handle_list_competitions(
    service: &CompetitionService,
    query: CompetitionQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_competitions_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Competitions retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "查询标准竞赛列表失败")),
    }
}

pub async fn handle_create_competition(
    service: &CompetitionService,
    competition: CompetitionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if competition.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "赛事名称不能为空",
        )));
    }

    // 挂接的评级条目必须已存在
    if let Some(rating_info) = &competition.rating_info {
        match storage.get_rating_info_by_name(rating_info).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::RatingInfoNotFound,
                    format!("评级条目不存在: {rating_info}"),
                )));
            }
            Err(e) => return Ok(storage_error_response(&e, "查询评级条目失败")),
        }
    }

    match storage.create_competition(competition).await {
        Ok(created) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            created,
            "Competition created successfully",
        ))),
        Err(AwardSysError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::CompetitionConflict, "同名标准竞赛已存在"),
        )),
        Err(e) => Ok(storage_error_response(&e, "创建标准竞赛失败")),
    }
}

pub async fn handle_update_competition(
    service: &CompetitionService,
    name: String,
    update: CompetitionUpdateRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(rating_info) = &update.rating_info {
        match storage.get_rating_info_by_name(rating_info).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::RatingInfoNotFound,
                    format!("评级条目不存在: {rating_info}"),
                )));
            }
            Err(e) => return Ok(storage_error_response(&e, "查询评级条目失败")),
        }
    }

    match storage.update_competition(&name, update).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Competition updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CompetitionNotFound,
            format!("标准竞赛不存在: {name}"),
        ))),
        Err(e) => Ok(storage_error_response(&e, "更新标准竞赛失败")),
    }
}

pub async fn handle_delete_competition(
    service: &CompetitionService,
    name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_competition(&name).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Competition deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CompetitionNotFound,
            format!("标准竞赛不存在: {name}"),
        ))),
        Err(e) => Ok(storage_error_response(&e, "删除标准竞赛失败")),
    }
}
