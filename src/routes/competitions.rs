use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::competitions::requests::{
    CompetitionQueryParams, CompetitionRequest, CompetitionUpdateRequest, RatingInfoRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CompetitionService;

// 懒加载的全局 CompetitionService 实例
static COMPETITION_SERVICE: Lazy<CompetitionService> = Lazy::new(CompetitionService::new_lazy);

// ---- 标准竞赛 ----

pub async fn list_competitions(
    req: HttpRequest,
    query: web::Query<CompetitionQueryParams>,
) -> ActixResult<HttpResponse> {
    COMPETITION_SERVICE
        .list_competitions(query.into_inner(), &req)
        .await
}

pub async fn create_competition(
    req: HttpRequest,
    data: web::Json<CompetitionRequest>,
) -> ActixResult<HttpResponse> {
    COMPETITION_SERVICE
        .create_competition(data.into_inner(), &req)
        .await
}

pub async fn update_competition(
    req: HttpRequest,
    name: web::Path<String>,
    data: web::Json<CompetitionUpdateRequest>,
) -> ActixResult<HttpResponse> {
    COMPETITION_SERVICE
        .update_competition(name.into_inner(), data.into_inner(), &req)
        .await
}

pub async fn delete_competition(
    req: HttpRequest,
    name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    COMPETITION_SERVICE
        .delete_competition(name.into_inner(), &req)
        .await
}

// ---- 评级条目 ----

pub async fn list_rating_infos(
    req: HttpRequest,
    query: web::Query<CompetitionQueryParams>,
) -> ActixResult<HttpResponse> {
    COMPETITION_SERVICE
        .list_rating_infos(query.into_inner(), &req)
        .await
}

pub async fn batch_rating_infos(
    req: HttpRequest,
    rows: web::Json<Vec<RatingInfoRequest>>,
) -> ActixResult<HttpResponse> {
    COMPETITION_SERVICE
        .batch_rating_infos(rows.into_inner(), &req)
        .await
}

pub async fn delete_rating_info(
    req: HttpRequest,
    name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    COMPETITION_SERVICE
        .delete_rating_info(name.into_inner(), &req)
        .await
}

// 配置路由（标准竞赛与评级条目维护仅管理员可用）
pub fn configure_competition_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/competitions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/rating_infos/batch", web::post().to(batch_rating_infos))
                    .route("/rating_infos", web::get().to(list_rating_infos))
                    .route(
                        "/rating_infos/{name}",
                        web::delete().to(delete_rating_info),
                    )
                    .route("", web::get().to(list_competitions))
                    .route("", web::post().to(create_competition))
                    .route("/{name}", web::put().to(update_competition))
                    .route("/{name}", web::delete().to(delete_competition)),
            ),
    );
}
