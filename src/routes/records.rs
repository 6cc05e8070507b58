use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::records::requests::{CreateRecordRequest, RecordListQuery, UpdateRecordRequest};
use crate::models::reviews::requests::ReviewUpdateRequest;
use crate::models::users::entities::UserRole;
use crate::services::{ImageService, RecordService, ReviewService};

// 懒加载的全局服务实例
static RECORD_SERVICE: Lazy<RecordService> = Lazy::new(RecordService::new_lazy);
static REVIEW_SERVICE: Lazy<ReviewService> = Lazy::new(ReviewService::new_lazy);
static IMAGE_SERVICE: Lazy<ImageService> = Lazy::new(ImageService::new_lazy);

// ---- 记录 ----

pub async fn list_records(
    req: HttpRequest,
    query: web::Query<RecordListQuery>,
) -> ActixResult<HttpResponse> {
    RECORD_SERVICE.list_records(query.into_inner(), &req).await
}

pub async fn create_record(
    req: HttpRequest,
    data: web::Json<CreateRecordRequest>,
) -> ActixResult<HttpResponse> {
    RECORD_SERVICE.create_record(data.into_inner(), &req).await
}

pub async fn export_records(
    req: HttpRequest,
    query: web::Query<RecordListQuery>,
) -> ActixResult<HttpResponse> {
    RECORD_SERVICE
        .export_records(query.into_inner(), &req)
        .await
}

pub async fn get_record(req: HttpRequest, record_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    RECORD_SERVICE.get_record(record_id.into_inner(), &req).await
}

pub async fn update_record(
    req: HttpRequest,
    record_id: web::Path<i64>,
    data: web::Json<UpdateRecordRequest>,
) -> ActixResult<HttpResponse> {
    RECORD_SERVICE
        .update_record(record_id.into_inner(), data.into_inner(), &req)
        .await
}

pub async fn delete_record(
    req: HttpRequest,
    record_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    RECORD_SERVICE
        .delete_record(record_id.into_inner(), &req)
        .await
}

// ---- 审核 ----

pub async fn update_review(
    req: HttpRequest,
    record_id: web::Path<i64>,
    data: web::Json<ReviewUpdateRequest>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .update_review(record_id.into_inner(), data.into_inner(), &req)
        .await
}

// ---- 附件 ----

pub async fn upload_image(
    req: HttpRequest,
    path: web::Path<(i64, String)>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let (record_id, category) = path.into_inner();
    IMAGE_SERVICE
        .upload_image(record_id, category, payload, &req)
        .await
}

pub async fn list_images(req: HttpRequest, record_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE
        .list_images(record_id.into_inner(), &req)
        .await
}

pub async fn download_image(
    req: HttpRequest,
    path: web::Path<(i64, String)>,
) -> ActixResult<HttpResponse> {
    let (record_id, category) = path.into_inner();
    IMAGE_SERVICE
        .download_image(record_id, category, &req)
        .await
}

// 配置路由
pub fn configure_record_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/records")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 学生只能看到自己提交的记录，处理函数内收窄
                    .route(web::get().to(list_records))
                    .route(
                        web::post()
                            .to(create_record)
                            // 获奖记录由学生提交
                            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                    ),
            )
            .service(
                web::resource("/export").route(
                    web::get()
                        .to(export_records)
                        // 报表导出仅管理员可用
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_record))
                    .route(web::put().to(update_record))
                    .route(web::delete().to(delete_record)),
            )
            .service(
                web::resource("/{id}/review").route(
                    web::put()
                        .to(update_review)
                        // 审核结论仅管理员可下
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(web::resource("/{id}/images").route(web::get().to(list_images)))
            .service(
                web::resource("/{id}/images/{category}")
                    .route(web::get().to(download_image))
                    .route(web::post().to(upload_image)),
            ),
    );
}
