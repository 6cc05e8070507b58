use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AwardSysError;
use crate::middlewares::RequireJWT;
use crate::models::records::requests::{CreateRecordData, CreateRecordRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::RecordService;

pub async fn handle_create_record(
    service: &RecordService,
    create_request: CreateRecordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "用户未登录",
            )));
        }
    };

    if create_request.students.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "参与学生列表不能为空",
        )));
    }
    if !create_request
        .students
        .contains(&create_request.main_student)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "主力学生必须出现在参与学生列表中",
        )));
    }

    // 提交时间由服务端决定
    let data = CreateRecordData {
        works_name: create_request.works_name,
        award_level: create_request.award_level,
        teacher_card_id: create_request.teacher,
        student_card_ids: create_request.students,
        main_student_card_id: create_request.main_student,
        submit_user_id: user_id,
        update_time: chrono::Utc::now().timestamp(),
        competition_name: create_request.competition_name,
        category: create_request.competition_category,
        hold_time: create_request.hold_time,
        organizer: create_request.organizer,
    };

    match storage.create_award_record(data).await {
        Ok(detail) => {
            tracing::info!("用户 {} 提交获奖记录 {}", user_id, detail.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                detail,
                "Record created successfully",
            )))
        }
        Err(AwardSysError::NotFound(msg)) => {
            // 目录里找不到引用的教师/学生
            let code = if msg.contains("教师") {
                ErrorCode::TeacherNotFound
            } else {
                ErrorCode::StudentNotFound
            };
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(code, msg)))
        }
        Err(e) => Ok(storage_error_response(&e, "创建获奖记录失败")),
    }
}
