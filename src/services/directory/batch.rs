//! 目录批量导入。
//!
//! 逐行落库，行内按 学院 -> 专业 -> 班级 的顺序解析并按需创建；
//! 出错即停，已处理的行保持落库状态（调用方可修正后重新导入，导入是幂等的）。
//! 同一批次内解析过的学院/专业缓存在内存里，避免逐行重查。

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{AwardSysError, Result};
use crate::models::directory::entities::{Class, College, Subject};
use crate::models::directory::requests::{
    ClassBatchRow, CollegeRequest, StudentBatchRow, SubjectRequest, TeacherRequest,
};
use crate::models::directory::responses::{
    ClassBatchResponse, ClassBatchResult, CollegeBatchResponse, StudentBatchResponse,
    StudentBatchResult, SubjectBatchResponse, TeacherBatchResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::{
    validate_card_id, validate_class_number, validate_directory_name, validate_grade,
    validate_person_name,
};

use super::DirectoryService;

/// 单批次内的解析缓存
#[derive(Default)]
pub struct BatchContext {
    colleges: HashMap<String, College>,
    subjects: HashMap<String, Subject>,
}

/// 按名称解析学院，不存在则创建
pub async fn resolve_college(
    storage: &Arc<dyn Storage>,
    ctx: &mut BatchContext,
    name: &str,
) -> Result<College> {
    if let Some(college) = ctx.colleges.get(name) {
        return Ok(college.clone());
    }
    validate_directory_name(name).map_err(AwardSysError::validation)?;

    let college = match storage.get_college_by_name(name).await? {
        Some(college) => college,
        None => storage.create_college(name).await?,
    };
    ctx.colleges.insert(name.to_string(), college.clone());
    Ok(college)
}

/// 按名称解析专业，不存在则在给定学院下创建。
///
/// 行里的学院每行都会解析并按需创建；已存在的专业保留其
/// 原有学院归属，不会被导入行改挂。
pub async fn resolve_subject(
    storage: &Arc<dyn Storage>,
    ctx: &mut BatchContext,
    subject_name: &str,
    college_name: &str,
) -> Result<Subject> {
    let college = resolve_college(storage, ctx, college_name).await?;

    if let Some(subject) = ctx.subjects.get(subject_name) {
        return Ok(subject.clone());
    }
    validate_directory_name(subject_name).map_err(AwardSysError::validation)?;

    let subject = match storage.get_subject_by_name(subject_name).await? {
        Some(subject) => subject,
        None => storage.create_subject(subject_name, college.id).await?,
    };
    ctx.subjects.insert(subject_name.to_string(), subject.clone());
    Ok(subject)
}

/// 按 (年级, 班号, 专业) 三元组解析班级，不存在则创建
pub async fn resolve_class(
    storage: &Arc<dyn Storage>,
    ctx: &mut BatchContext,
    grade: i32,
    number: i32,
    subject_name: &str,
    college_name: &str,
) -> Result<Class> {
    validate_grade(grade).map_err(AwardSysError::validation)?;
    validate_class_number(number).map_err(AwardSysError::validation)?;

    let subject = resolve_subject(storage, ctx, subject_name, college_name).await?;

    match storage.get_class_by_triple(grade, number, subject.id).await? {
        Some(class) => Ok(class),
        None => storage.create_class(grade, number, subject.id).await,
    }
}

// 带行号的批量导入错误响应
fn batch_error_response(row: usize, e: &AwardSysError) -> HttpResponse {
    let message = format!("第 {row} 行: {}", e.message());
    match e {
        AwardSysError::Validation(_) => HttpResponse::BadRequest().json(
            ApiResponse::<()>::error_empty(ErrorCode::ValidationFailed, message),
        ),
        AwardSysError::NotFound(_) => HttpResponse::NotFound().json(
            ApiResponse::<()>::error_empty(ErrorCode::NotFound, message),
        ),
        _ => {
            tracing::error!("批量导入失败: {e}");
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                message,
            ))
        }
    }
}

pub async fn handle_batch_colleges(
    service: &DirectoryService,
    rows: Vec<CollegeRequest>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let mut ctx = BatchContext::default();
    let mut results = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        match resolve_college(&storage, &mut ctx, &row.name).await {
            Ok(college) => results.push(college),
            Err(e) => return Ok(batch_error_response(idx + 1, &e)),
        }
    }

    tracing::info!("学院批量导入完成: {} 行", results.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CollegeBatchResponse { results },
        "Colleges imported successfully",
    )))
}

pub async fn handle_batch_subjects(
    service: &DirectoryService,
    rows: Vec<SubjectRequest>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let mut ctx = BatchContext::default();
    let mut results = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        match resolve_subject(&storage, &mut ctx, &row.name, &row.college).await {
            Ok(subject) => results.push(subject),
            Err(e) => return Ok(batch_error_response(idx + 1, &e)),
        }
    }

    tracing::info!("专业批量导入完成: {} 行", results.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubjectBatchResponse { results },
        "Subjects imported successfully",
    )))
}

pub async fn handle_batch_classes(
    service: &DirectoryService,
    rows: Vec<ClassBatchRow>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let mut ctx = BatchContext::default();
    let mut results = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        match resolve_class(
            &storage,
            &mut ctx,
            row.grade,
            row.number,
            &row.subject,
            &row.college,
        )
        .await
        {
            Ok(class) => results.push(ClassBatchResult {
                grade: class.grade,
                number: class.number,
                subject: class.subject_name,
                college: class.college_name,
            }),
            Err(e) => return Ok(batch_error_response(idx + 1, &e)),
        }
    }

    tracing::info!("班级批量导入完成: {} 行", results.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClassBatchResponse { results },
        "Classes imported successfully",
    )))
}

pub async fn handle_batch_students(
    service: &DirectoryService,
    rows: Vec<StudentBatchRow>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let mut ctx = BatchContext::default();
    let mut results = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let outcome = async {
            validate_card_id(&row.card_id).map_err(AwardSysError::validation)?;
            validate_person_name(&row.name).map_err(AwardSysError::validation)?;

            let class = resolve_class(
                &storage,
                &mut ctx,
                row.clazz_grade,
                row.clazz_number,
                &row.subject,
                &row.college,
            )
            .await?;

            // 学号已存在时覆盖姓名和班级
            storage
                .upsert_student(&row.card_id, &row.name, Some(class.id))
                .await?;
            Ok::<Class, AwardSysError>(class)
        }
        .await;

        match outcome {
            Ok(class) => results.push(StudentBatchResult {
                card_id: row.card_id.clone(),
                name: row.name.clone(),
                grade: class.grade,
                number: class.number,
                subject: class.subject_name,
                college: class.college_name,
            }),
            Err(e) => return Ok(batch_error_response(idx + 1, &e)),
        }
    }

    tracing::info!("学生批量导入完成: {} 行", results.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentBatchResponse { results },
        "Students imported successfully",
    )))
}

pub async fn handle_batch_teachers(
    service: &DirectoryService,
    rows: Vec<TeacherRequest>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let mut results = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let outcome = async {
            validate_card_id(&row.card_id).map_err(AwardSysError::validation)?;
            validate_person_name(&row.name).map_err(AwardSysError::validation)?;
            storage.upsert_teacher(&row.card_id, &row.name).await
        }
        .await;

        match outcome {
            Ok(teacher) => results.push(teacher),
            Err(e) => return Ok(batch_error_response(idx + 1, &e)),
        }
    }

    tracing::info!("教师批量导入完成: {} 行", results.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeacherBatchResponse { results },
        "Teachers imported successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::{
        BatchContext, handle_batch_colleges, handle_batch_subjects, resolve_class,
        resolve_college, resolve_subject,
    };
    use crate::errors::AwardSysError;
    use crate::models::common::pagination::PaginationQuery;
    use crate::models::directory::requests::{
        CollegeRequest, DirectoryQueryParams, SubjectRequest,
    };
    use crate::services::DirectoryService;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use std::sync::Arc;

    async fn memory_storage() -> Arc<dyn Storage> {
        Arc::new(
            SeaOrmStorage::new_with_url(":memory:")
                .await
                .expect("内存库初始化失败"),
        )
    }

    #[actix_web::test]
    async fn resolve_chain_is_idempotent() {
        let storage = memory_storage().await;

        let mut ctx = BatchContext::default();
        let class = resolve_class(&storage, &mut ctx, 2023, 1, "软件工程", "计算机学院")
            .await
            .unwrap();

        // 换一个空缓存重跑同一行，必须命中既有条目而不是重复建档
        let mut ctx = BatchContext::default();
        let again = resolve_class(&storage, &mut ctx, 2023, 1, "软件工程", "计算机学院")
            .await
            .unwrap();
        assert_eq!(again.id, class.id);

        let colleges = storage
            .list_colleges_with_pagination(DirectoryQueryParams {
                pagination: PaginationQuery::default(),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(colleges.items.len(), 1);
    }

    #[actix_web::test]
    async fn existing_subject_keeps_its_college() {
        let storage = memory_storage().await;

        let mut ctx = BatchContext::default();
        resolve_subject(&storage, &mut ctx, "软件工程", "计算机学院")
            .await
            .unwrap();

        // 导入行写了另一个学院，已有专业不改挂
        let mut ctx = BatchContext::default();
        let subject = resolve_subject(&storage, &mut ctx, "软件工程", "人工智能学院")
            .await
            .unwrap();
        assert_eq!(subject.college_name, "计算机学院");

        // 行里的学院本身仍然要建档
        assert!(
            storage
                .get_college_by_name("人工智能学院")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[actix_web::test]
    async fn same_triple_under_different_subjects_coexists() {
        let storage = memory_storage().await;

        let mut ctx = BatchContext::default();
        let a = resolve_class(&storage, &mut ctx, 2023, 1, "软件工程", "计算机学院")
            .await
            .unwrap();
        let b = resolve_class(&storage, &mut ctx, 2023, 1, "网络工程", "计算机学院")
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[actix_web::test]
    async fn college_batch_dedupes_repeated_rows() {
        let storage = memory_storage().await;
        let service = DirectoryService {
            storage: Some(storage.clone()),
        };
        let req = TestRequest::default().to_http_request();

        let rows = vec![
            CollegeRequest {
                name: "计算机学院".to_string(),
            },
            CollegeRequest {
                name: "计算机学院".to_string(),
            },
            CollegeRequest {
                name: "外国语学院".to_string(),
            },
        ];
        let resp = handle_batch_colleges(&service, rows, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let colleges = storage
            .list_colleges_with_pagination(DirectoryQueryParams {
                pagination: PaginationQuery::default(),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(colleges.items.len(), 2);
    }

    #[actix_web::test]
    async fn subject_batch_result_reflects_actual_college() {
        let storage = memory_storage().await;
        let service = DirectoryService {
            storage: Some(storage.clone()),
        };
        let req = TestRequest::default().to_http_request();

        let mut ctx = BatchContext::default();
        resolve_subject(&storage, &mut ctx, "软件工程", "计算机学院")
            .await
            .unwrap();

        // 行里写了另一个学院：学院建档，但结果行回显专业实际归属
        let rows = vec![SubjectRequest {
            name: "软件工程".to_string(),
            college: "人工智能学院".to_string(),
        }];
        let resp = handle_batch_subjects(&service, rows, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("计算机学院"));

        assert!(
            storage
                .get_college_by_name("人工智能学院")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[actix_web::test]
    async fn subject_batch_error_carries_row_number() {
        let storage = memory_storage().await;
        let service = DirectoryService {
            storage: Some(storage.clone()),
        };
        let req = TestRequest::default().to_http_request();

        let rows = vec![
            SubjectRequest {
                name: "软件工程".to_string(),
                college: "计算机学院".to_string(),
            },
            SubjectRequest {
                name: String::new(),
                college: "计算机学院".to_string(),
            },
        ];
        let resp = handle_batch_subjects(&service, rows, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("第 2 行"));

        // 出错前的行保持落库
        assert!(
            storage
                .get_subject_by_name("软件工程")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[actix_web::test]
    async fn invalid_college_name_fails_validation() {
        let storage = memory_storage().await;

        let mut ctx = BatchContext::default();
        let result = resolve_college(&storage, &mut ctx, "").await;
        assert!(matches!(result, Err(AwardSysError::Validation(_))));
    }
}
