use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AwardSysError;
use crate::middlewares::RequireJWT;
use crate::models::records::requests::{UpdateRecordData, UpdateRecordRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::RecordService;

/// 修改获奖记录。
///
/// 仅提交者本人（管理员除外）可修改，任何字段变更都会把审核状态重置为待审。
pub async fn handle_update_record(
    service: &RecordService,
    record_id: i64,
    update_request: UpdateRecordRequest,
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
    let role = RequireJWT::extract_user_role(request);

    let existing = match storage.get_record_detail(record_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RecordNotFound,
                "获奖记录不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询获奖记录失败")),
    };

    if role != Some(UserRole::Admin) && existing.submit_user != Some(user_id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能修改自己提交的记录",
        )));
    }

    if let Some(students) = &update_request.students {
        if students.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "参与学生列表不能为空",
            )));
        }
        // 主力学生取新值，未给出时沿用原值
        let main = update_request
            .main_student
            .clone()
            .or_else(|| existing.main_student.clone());
        match main {
            Some(main) if students.contains(&main) => {}
            _ => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationFailed,
                    "主力学生必须出现在参与学生列表中",
                )));
            }
        }
    } else if let Some(main) = &update_request.main_student
        && !existing.students.contains(main)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "主力学生必须出现在参与学生列表中",
        )));
    }

    let data = UpdateRecordData {
        works_name: update_request.works_name,
        award_level: update_request.award_level,
        teacher_card_id: update_request.teacher,
        student_card_ids: update_request.students,
        main_student_card_id: update_request.main_student,
        update_time: chrono::Utc::now().timestamp(),
        competition_name: update_request.competition_name,
        category: update_request.competition_category,
        hold_time: update_request.hold_time,
        organizer: update_request.organizer,
    };

    match storage.update_award_record(record_id, data).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Record updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RecordNotFound,
            "获奖记录不存在",
        ))),
        Err(AwardSysError::NotFound(msg)) => {
            let code = if msg.contains("教师") {
                ErrorCode::TeacherNotFound
            } else {
                ErrorCode::StudentNotFound
            };
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(code, msg)))
        }
        Err(e) => Ok(storage_error_response(&e, "更新获奖记录失败")),
    }
}
