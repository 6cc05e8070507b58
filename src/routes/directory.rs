use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::directory::requests::{
    ClassBatchRow, ClassQueryParams, ClassRequest, CollegeRequest, DirectoryQueryParams,
    StudentBatchRow, StudentQueryParams, StudentRequest, StudentUpdateRequest, SubjectRequest,
    TeacherRequest, TeacherUpdateRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::DirectoryService;

// 懒加载的全局 DirectoryService 实例
static DIRECTORY_SERVICE: Lazy<DirectoryService> = Lazy::new(DirectoryService::new_lazy);

// ---- 学院 ----

pub async fn list_colleges(
    req: HttpRequest,
    query: web::Query<DirectoryQueryParams>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .list_colleges(query.into_inner(), &req)
        .await
}

pub async fn create_college(
    req: HttpRequest,
    data: web::Json<CollegeRequest>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .create_college(data.into_inner(), &req)
        .await
}

pub async fn update_college(
    req: HttpRequest,
    name: web::Path<String>,
    data: web::Json<CollegeRequest>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .update_college(name.into_inner(), data.into_inner(), &req)
        .await
}

pub async fn delete_college(
    req: HttpRequest,
    name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .delete_college(name.into_inner(), &req)
        .await
}

pub async fn batch_colleges(
    req: HttpRequest,
    rows: web::Json<Vec<CollegeRequest>>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .batch_colleges(rows.into_inner(), &req)
        .await
}

// ---- 专业 ----

pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<DirectoryQueryParams>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .list_subjects(query.into_inner(), &req)
        .await
}

pub async fn create_subject(
    req: HttpRequest,
    data: web::Json<SubjectRequest>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .create_subject(data.into_inner(), &req)
        .await
}

pub async fn update_subject(
    req: HttpRequest,
    name: web::Path<String>,
    data: web::Json<SubjectRequest>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .update_subject(name.into_inner(), data.into_inner(), &req)
        .await
}

pub async fn delete_subject(
    req: HttpRequest,
    name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .delete_subject(name.into_inner(), &req)
        .await
}

pub async fn batch_subjects(
    req: HttpRequest,
    rows: web::Json<Vec<SubjectRequest>>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .batch_subjects(rows.into_inner(), &req)
        .await
}

// ---- 班级 ----

pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .list_classes(query.into_inner(), &req)
        .await
}

pub async fn create_class(
    req: HttpRequest,
    data: web::Json<ClassRequest>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE.create_class(data.into_inner(), &req).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: web::Path<i64>,
    data: web::Json<ClassRequest>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .update_class(class_id.into_inner(), data.into_inner(), &req)
        .await
}

pub async fn delete_class(
    req: HttpRequest,
    class_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .delete_class(class_id.into_inner(), &req)
        .await
}

pub async fn batch_classes(
    req: HttpRequest,
    rows: web::Json<Vec<ClassBatchRow>>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .batch_classes(rows.into_inner(), &req)
        .await
}

// ---- 学生 ----

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentQueryParams>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .list_students(query.into_inner(), &req)
        .await
}

pub async fn create_student(
    req: HttpRequest,
    data: web::Json<StudentRequest>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .create_student(data.into_inner(), &req)
        .await
}

pub async fn update_student(
    req: HttpRequest,
    card_id: web::Path<String>,
    data: web::Json<StudentUpdateRequest>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .update_student(card_id.into_inner(), data.into_inner(), &req)
        .await
}

pub async fn delete_student(
    req: HttpRequest,
    card_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .delete_student(card_id.into_inner(), &req)
        .await
}

pub async fn batch_students(
    req: HttpRequest,
    rows: web::Json<Vec<StudentBatchRow>>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .batch_students(rows.into_inner(), &req)
        .await
}

// ---- 教师 ----

pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<DirectoryQueryParams>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .list_teachers(query.into_inner(), &req)
        .await
}

pub async fn create_teacher(
    req: HttpRequest,
    data: web::Json<TeacherRequest>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .create_teacher(data.into_inner(), &req)
        .await
}

pub async fn update_teacher(
    req: HttpRequest,
    card_id: web::Path<String>,
    data: web::Json<TeacherUpdateRequest>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .update_teacher(card_id.into_inner(), data.into_inner(), &req)
        .await
}

pub async fn delete_teacher(
    req: HttpRequest,
    card_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .delete_teacher(card_id.into_inner(), &req)
        .await
}

pub async fn batch_teachers(
    req: HttpRequest,
    rows: web::Json<Vec<TeacherRequest>>,
) -> ActixResult<HttpResponse> {
    DIRECTORY_SERVICE
        .batch_teachers(rows.into_inner(), &req)
        .await
}

// 配置路由（组织目录维护仅管理员可用）
pub fn configure_directory_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/directory")
            .wrap(middlewares::RequireJWT)
            // 班级 / 学生 / 教师名册对所有登录用户只读开放，
            // 供填报获奖记录时查询
            .route("/classes", web::get().to(list_classes))
            .route("/students", web::get().to(list_students))
            .route("/teachers", web::get().to(list_teachers))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/colleges/batch", web::post().to(batch_colleges))
                    .route("/colleges", web::get().to(list_colleges))
                    .route("/colleges", web::post().to(create_college))
                    .route("/colleges/{name}", web::put().to(update_college))
                    .route("/colleges/{name}", web::delete().to(delete_college))
                    .route("/subjects/batch", web::post().to(batch_subjects))
                    .route("/subjects", web::get().to(list_subjects))
                    .route("/subjects", web::post().to(create_subject))
                    .route("/subjects/{name}", web::put().to(update_subject))
                    .route("/subjects/{name}", web::delete().to(delete_subject))
                    .route("/classes/batch", web::post().to(batch_classes))
                    .route("/classes", web::post().to(create_class))
                    .route("/classes/{id}", web::put().to(update_class))
                    .route("/classes/{id}", web::delete().to(delete_class))
                    .route("/students/batch", web::post().to(batch_students))
                    .route("/students", web::post().to(create_student))
                    .route("/students/{card_id}", web::put().to(update_student))
                    .route("/students/{card_id}", web::delete().to(delete_student))
                    .route("/teachers/batch", web::post().to(batch_teachers))
                    .route("/teachers", web::post().to(create_teacher))
                    .route("/teachers/{card_id}", web::put().to(update_teacher))
                    .route("/teachers/{card_id}", web::delete().to(delete_teacher)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::configure_directory_routes;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserData;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use crate::utils::jwt::JwtUtils;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::json;
    use std::sync::Arc;

    async fn student_storage_and_token() -> (Arc<dyn Storage>, String) {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::new_with_url(":memory:")
                .await
                .expect("内存库初始化失败"),
        );
        let user = storage
            .create_user(CreateUserData {
                username: "S2023001".to_string(),
                password_hash: "unused".to_string(),
                role: UserRole::Student,
                display_name: Some("李明".to_string()),
            })
            .await
            .unwrap();
        let token = JwtUtils::generate_access_token(user.id, UserRole::STUDENT).unwrap();
        (storage, token)
    }

    #[actix_web::test]
    async fn student_reads_roster_but_cannot_mutate() {
        let (storage, token) = student_storage_and_token().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_directory_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/directory/classes")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/directory/classes")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"grade": 2023, "number": 1, "subject": "软件工程"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // 学院目录仍然只对管理员开放
        let req = test::TestRequest::get()
            .uri("/api/v1/directory/colleges")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn roster_lookup_requires_login() {
        let (storage, _token) = student_storage_and_token().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_directory_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/directory/teachers")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
