use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::users::requests::{UserListQuery, UserQueryParams};
use crate::services::storage_error_response;

use super::UserService;

pub async fn handle_list_users(
    service: &UserService,
    query: UserQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = UserListQuery {
        page: query.pagination.page,
        size: query.pagination.size,
        role: query.user_type,
        search: query.search,
    };

    match storage.list_users_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Users retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "查询账号列表失败")),
    }
}
