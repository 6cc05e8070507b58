use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::competitions::requests::{CompetitionQueryParams, RatingInfoRequest};
use crate::models::competitions::responses::{RatingInfoBatchResponse, RatingInfoBatchResult};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::CompetitionService;

pub async fn handle_list_rating_infos(
    service: &CompetitionService,
    query: CompetitionQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_rating_infos_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Rating infos retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "查询评级条目列表失败")),
    }
}

/// 批量导入评级条目。
/// 逐行按竞赛名覆盖，出错即停，已处理的行保持落库状态。
pub async fn handle_batch_rating_infos(
    service: &CompetitionService,
    rows: Vec<RatingInfoRequest>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let mut results = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        if row.competition_name.trim().is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                format!("第 {} 行: 竞赛名称不能为空", idx + 1),
            )));
        }

        match storage
            .upsert_rating_info(&row.competition_name, &row.category, &row.level_title, row.level)
            .await
        {
            Ok(created) => results.push(RatingInfoBatchResult {
                competition_name: row.competition_name.clone(),
                created,
            }),
            Err(e) => {
                tracing::error!("评级条目导入第 {} 行失败: {}", idx + 1, e);
                return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("第 {} 行: {}", idx + 1, e.message()),
                )));
            }
        }
    }

    tracing::info!("评级条目批量导入完成: {} 行", results.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RatingInfoBatchResponse { results },
        "Rating infos imported successfully",
    )))
}

pub async fn handle_delete_rating_info(
    service: &CompetitionService,
    competition_name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_rating_info(&competition_name).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Rating info deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RatingInfoNotFound,
            format!("评级条目不存在: {competition_name}"),
        ))),
        Err(e) => Ok(storage_error_response(&e, "删除评级条目失败")),
    }
}
