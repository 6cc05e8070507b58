use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AwardSysError;
use crate::models::competitions::requests::CompetitionRequest;
use crate::models::reviews::entities::ReviewStatus;
use crate::models::reviews::requests::ReviewUpdateRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::ReviewService;

/// 管理员审核获奖记录。
///
/// 通过时先把记录挂接到标准竞赛，顺序固定：
/// 1. 请求显式给出赛事名 -> 该标准竞赛必须已存在；
/// 2. 记录此前已通过审核挂接过 -> 沿用已挂接的标准竞赛；
/// 3. 按快照赛事名查找标准竞赛，找不到则用快照字段新建，
///    新建必须携带 rating_info 指明评级条目。
/// 挂接会用标准竞赛字段覆盖快照的自由文本，全部成功后才置为通过。
pub async fn handle_update_review(
    service: &ReviewService,
    record_id: i64,
    review_request: ReviewUpdateRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let detail = match storage.get_record_detail(record_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RecordNotFound,
                "获奖记录不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "查询获奖记录失败")),
    };

    if review_request.status == ReviewStatus::Passed {
        // 1. 解析标准竞赛
        let competition = if let Some(name) = &review_request.competition {
            match storage.get_competition_by_name(name).await {
                Ok(Some(c)) => c,
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::CompetitionNotFound,
                        format!("标准竞赛不存在: {name}"),
                    )));
                }
                Err(e) => return Ok(storage_error_response(&e, "查询标准竞赛失败")),
            }
        } else {
            // 已挂接过的记录沿用原竞赛，否则按快照赛事名解析
            let lookup_name = detail
                .competition
                .as_deref()
                .unwrap_or(&detail.competition_name);
            match storage.get_competition_by_name(lookup_name).await {
                Ok(Some(c)) => c,
                Ok(None) => {
                    // 标准竞赛不存在，用快照字段新建
                    let rating_info = match &review_request.rating_info {
                        Some(name) => name.clone(),
                        None => {
                            return Ok(HttpResponse::BadRequest().json(
                                ApiResponse::error_empty(
                                    ErrorCode::RatingInfoRequired,
                                    "rating_info is necessary",
                                ),
                            ));
                        }
                    };
                    match storage.get_rating_info_by_name(&rating_info).await {
                        Ok(Some(_)) => {}
                        Ok(None) => {
                            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                                ErrorCode::RatingInfoNotFound,
                                format!("评级条目不存在: {rating_info}"),
                            )));
                        }
                        Err(e) => return Ok(storage_error_response(&e, "查询评级条目失败")),
                    }

                    match storage
                        .create_competition(CompetitionRequest {
                            name: detail.competition_name.clone(),
                            category: detail.competition_category.clone(),
                            hold_time: detail.hold_time,
                            organizer: detail.organizer.clone(),
                            rating_info: Some(rating_info),
                        })
                        .await
                    {
                        Ok(c) => c,
                        // 并发审核同名赛事时另一个事务先建成
                        Err(AwardSysError::Conflict(msg)) => {
                            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                                ErrorCode::CompetitionConflict,
                                msg,
                            )));
                        }
                        Err(e) => return Ok(storage_error_response(&e, "创建标准竞赛失败")),
                    }
                }
                Err(e) => return Ok(storage_error_response(&e, "查询标准竞赛失败")),
            }
        };

        // 2. 用标准竞赛覆盖快照并建立挂接
        match storage.link_competition_record(record_id, &competition).await {
            Ok(true) => {}
            Ok(false) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::RecordNotFound,
                    "获奖记录不存在",
                )));
            }
            Err(e) => return Ok(storage_error_response(&e, "挂接标准竞赛失败")),
        }
    }

    // 3. 最后落审核状态，挂接失败时状态保持不变
    match storage.set_review_status(record_id, review_request.status).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RecordNotFound,
                "获奖记录不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "更新审核状态失败")),
    }

    tracing::info!("记录 {} 审核结论: {}", record_id, review_request.status);

    // 返回审核后的完整详情（含评级投影）
    match storage.get_record_detail(record_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Review updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RecordNotFound,
            "获奖记录不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e, "查询获奖记录失败")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::requests::CreateRecordData;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserData;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use chrono::NaiveDate;
    use std::sync::Arc;

    async fn setup() -> (ReviewService, Arc<dyn Storage>, i64) {
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
                display_name: None,
            })
            .await
            .unwrap();

        let detail = storage
            .create_award_record(CreateRecordData {
                works_name: None,
                award_level: "一等奖".to_string(),
                teacher_card_id: "T1001".to_string(),
                student_card_ids: vec!["S2023001".to_string()],
                main_student_card_id: "S2023001".to_string(),
                submit_user_id: user.id,
                update_time: 1_750_000_000,
                competition_name: "蓝桥杯（校内选拔）".to_string(),
                category: "程序设计".to_string(),
                hold_time: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
                organizer: "教务处".to_string(),
            })
            .await
            .unwrap();

        let service = ReviewService {
            storage: Some(storage.clone()),
        };
        (service, storage, detail.id)
    }

    fn approve() -> ReviewUpdateRequest {
        ReviewUpdateRequest {
            status: ReviewStatus::Passed,
            competition: None,
            rating_info: None,
        }
    }

    #[actix_web::test]
    async fn approve_unknown_competition_requires_rating_info() {
        let (service, storage, record_id) = setup().await;
        let request = TestRequest::default().to_http_request();

        let resp = handle_update_review(&service, record_id, approve(), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("rating_info is necessary"));

        // 失败的审核不改变状态
        assert_eq!(
            storage.get_review_status(record_id).await.unwrap(),
            Some(ReviewStatus::Waiting)
        );
    }

    #[actix_web::test]
    async fn approve_with_rating_info_creates_competition_from_snapshot() {
        let (service, storage, record_id) = setup().await;
        storage
            .upsert_rating_info("蓝桥杯", "A类赛事", "省级一等", 3)
            .await
            .unwrap();

        let request = TestRequest::default().to_http_request();
        let resp = handle_update_review(
            &service,
            record_id,
            ReviewUpdateRequest {
                rating_info: Some("蓝桥杯".to_string()),
                ..approve()
            },
            &request,
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        // 标准竞赛按快照字段新建并挂接
        let competition = storage
            .get_competition_by_name("蓝桥杯（校内选拔）")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(competition.rating_info.as_deref(), Some("蓝桥杯"));

        let detail = storage
            .get_record_detail(record_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.review_status, ReviewStatus::Passed);
        assert_eq!(detail.competition.as_deref(), Some("蓝桥杯（校内选拔）"));
        assert_eq!(detail.rating_category.as_deref(), Some("A类赛事"));
    }

    #[actix_web::test]
    async fn approve_with_unknown_rating_info_is_rejected() {
        let (service, storage, record_id) = setup().await;

        let request = TestRequest::default().to_http_request();
        let resp = handle_update_review(
            &service,
            record_id,
            ReviewUpdateRequest {
                rating_info: Some("不存在的评级".to_string()),
                ..approve()
            },
            &request,
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            storage.get_review_status(record_id).await.unwrap(),
            Some(ReviewStatus::Waiting)
        );
    }

    #[actix_web::test]
    async fn approve_with_explicit_competition_must_exist() {
        let (service, _storage, record_id) = setup().await;

        let request = TestRequest::default().to_http_request();
        let resp = handle_update_review(
            &service,
            record_id,
            ReviewUpdateRequest {
                competition: Some("没登记过的赛事".to_string()),
                ..approve()
            },
            &request,
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn approve_with_explicit_existing_competition_links_it() {
        let (service, storage, record_id) = setup().await;
        storage
            .create_competition(CompetitionRequest {
                name: "蓝桥杯".to_string(),
                category: "程序设计竞赛".to_string(),
                hold_time: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
                organizer: "工信部人才交流中心".to_string(),
                rating_info: None,
            })
            .await
            .unwrap();

        let request = TestRequest::default().to_http_request();
        let resp = handle_update_review(
            &service,
            record_id,
            ReviewUpdateRequest {
                competition: Some("蓝桥杯".to_string()),
                ..approve()
            },
            &request,
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let detail = storage
            .get_record_detail(record_id)
            .await
            .unwrap()
            .unwrap();
        // 快照被标准竞赛覆盖
        assert_eq!(detail.competition_name, "蓝桥杯");
        assert_eq!(detail.competition.as_deref(), Some("蓝桥杯"));
        assert_eq!(detail.review_status, ReviewStatus::Passed);
    }

    #[actix_web::test]
    async fn reject_does_not_touch_competitions() {
        let (service, storage, record_id) = setup().await;

        let request = TestRequest::default().to_http_request();
        let resp = handle_update_review(
            &service,
            record_id,
            ReviewUpdateRequest {
                status: ReviewStatus::NotPass,
                competition: None,
                rating_info: None,
            },
            &request,
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        assert_eq!(
            storage.get_review_status(record_id).await.unwrap(),
            Some(ReviewStatus::NotPass)
        );
        assert!(
            storage
                .get_competition_by_name("蓝桥杯（校内选拔）")
                .await
                .unwrap()
                .is_none()
        );
    }
}
