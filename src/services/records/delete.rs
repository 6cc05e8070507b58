use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::Path;

use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::reviews::entities::ReviewStatus;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::RecordService;

/// 删除获奖记录。
///
/// 管理员可删除任意记录；提交者本人只能在审核仍处于待审时删除。
/// 附件文件在数据库删除成功后清理，清理失败只记日志。
pub async fn handle_delete_record(
    service: &RecordService,
    record_id: i64,
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

    if role != Some(UserRole::Admin) {
        if existing.submit_user != Some(user_id) {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只能删除自己提交的记录",
            )));
        }
        if existing.review_status != ReviewStatus::Waiting {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::ReviewNotWaiting,
                "审核已有结论的记录不能删除",
            )));
        }
    }

    match storage.delete_award_record(record_id).await {
        Ok(Some(files)) => {
            let upload_dir = &AppConfig::get().upload.dir;
            for file in files {
                let path = Path::new(upload_dir).join(&file);
                if let Err(e) = std::fs::remove_file(&path) {
                    tracing::warn!("清理附件文件 {} 失败: {}", file, e);
                }
            }
            tracing::info!("用户 {} 删除获奖记录 {}", user_id, record_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Record deleted successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RecordNotFound,
            "获奖记录不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e, "删除获奖记录失败")),
    }
}

#[cfg(test)]
mod tests {
    use super::handle_delete_record;
    use crate::models::records::requests::CreateRecordData;
    use crate::models::reviews::entities::ReviewStatus;
    use crate::models::users::entities::{User, UserRole};
    use crate::models::users::requests::CreateUserData;
    use crate::services::RecordService;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use actix_web::HttpMessage;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use chrono::NaiveDate;
    use std::sync::Arc;

    async fn setup() -> (RecordService, Arc<dyn Storage>, i64, i64) {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::new_with_url(":memory:")
                .await
                .expect("内存库初始化失败"),
        );

        storage.create_teacher("T1001", "王老师").await.unwrap();
        storage
            .create_student("S2023001", "李明", None)
            .await
            .unwrap();
        let user = storage
            .create_user(CreateUserData {
                username: "S2023001".to_string(),
                password_hash: "unused".to_string(),
                role: UserRole::Student,
                display_name: Some("李明".to_string()),
            })
            .await
            .unwrap();

        let detail = storage
            .create_award_record(CreateRecordData {
                works_name: Some("智能巡线小车".to_string()),
                award_level: "一等奖".to_string(),
                teacher_card_id: "T1001".to_string(),
                student_card_ids: vec!["S2023001".to_string()],
                main_student_card_id: "S2023001".to_string(),
                submit_user_id: user.id,
                update_time: 1_750_000_000,
                competition_name: "全国大学生智能车竞赛".to_string(),
                category: "学科竞赛".to_string(),
                hold_time: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                organizer: "教育部高教司".to_string(),
            })
            .await
            .unwrap();

        let service = RecordService {
            storage: Some(storage.clone()),
        };
        (service, storage, detail.id, user.id)
    }

    fn request_as(user_id: i64, role: UserRole) -> actix_web::HttpRequest {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(User {
            id: user_id,
            username: "tester".to_string(),
            password_hash: "unused".to_string(),
            role,
            display_name: None,
            last_login: None,
            created_at: chrono::Utc::now(),
        });
        req
    }

    #[actix_web::test]
    async fn submitter_cannot_delete_after_review_concluded() {
        let (service, storage, record_id, user_id) = setup().await;
        storage
            .set_review_status(record_id, ReviewStatus::Passed)
            .await
            .unwrap();

        let req = request_as(user_id, UserRole::Student);
        let resp = handle_delete_record(&service, record_id, &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // 记录保持原样
        assert!(
            storage
                .get_record_detail(record_id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[actix_web::test]
    async fn submitter_deletes_own_waiting_record() {
        let (service, storage, record_id, user_id) = setup().await;

        let req = request_as(user_id, UserRole::Student);
        let resp = handle_delete_record(&service, record_id, &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            storage
                .get_record_detail(record_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn admin_deletes_concluded_record() {
        let (service, storage, record_id, user_id) = setup().await;
        storage
            .set_review_status(record_id, ReviewStatus::Passed)
            .await
            .unwrap();

        let req = request_as(user_id + 1, UserRole::Admin);
        let resp = handle_delete_record(&service, record_id, &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            storage
                .get_record_detail(record_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn other_student_cannot_delete_someone_elses_record() {
        let (service, _storage, record_id, user_id) = setup().await;

        let req = request_as(user_id + 1, UserRole::Student);
        let resp = handle_delete_record(&service, record_id, &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
