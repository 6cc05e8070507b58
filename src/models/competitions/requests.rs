use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::common::pagination::PaginationQuery;

#[derive(Debug, Clone, Deserialize)]
pub struct CompetitionRequest {
    pub name: String,
    pub category: String,
    pub hold_time: NaiveDate,
    pub organizer: String,
    pub rating_info: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompetitionUpdateRequest {
    pub category: Option<String>,
    pub hold_time: Option<NaiveDate>,
    pub organizer: Option<String>,
    pub rating_info: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingInfoRequest {
    pub competition_name: String,
    pub category: String,
    pub level_title: String,
    pub level: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompetitionQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub category: Option<String>,
}
