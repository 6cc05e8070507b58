use serde::Serialize;

use super::entities::{Competition, RatingInfo};
use crate::models::common::pagination::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct CompetitionListResponse {
    pub competitions: Vec<Competition>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct RatingInfoListResponse {
    pub rating_infos: Vec<RatingInfo>,
    pub pagination: PaginationInfo,
}

/// 批量导入评级条目的结果行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingInfoBatchResult {
    pub competition_name: String,
    pub created: bool,
}

#[derive(Debug, Serialize)]
pub struct RatingInfoBatchResponse {
    pub results: Vec<RatingInfoBatchResult>,
}
