use chrono::NaiveDate;
use serde::Serialize;

use crate::models::common::pagination::PaginationInfo;
use crate::models::directory::entities::{Student, Teacher};
use crate::models::images::entities::Image;
use crate::models::reviews::entities::ReviewStatus;

/// 获奖记录详情视图
///
/// `teacher` / `students` / `main_student` 返回工号学号，
/// 对应的 `*_info` 字段在目录中仍存在时展开完整档案。
/// 目录条目被删除后外键置空，相应字段为 null。
#[derive(Debug, Clone, Serialize)]
pub struct RecordDetail {
    pub id: i64,
    pub works_name: Option<String>,
    pub award_level: String,
    pub update_time: i64,
    pub submit_user: Option<i64>,

    pub teacher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_info: Option<Teacher>,
    pub students: Vec<String>,
    pub students_info: Vec<Student>,
    pub main_student: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_student_info: Option<Student>,

    pub competition_name: String,
    pub competition_category: String,
    pub hold_time: NaiveDate,
    pub organizer: String,
    /// 审核通过后回填的标准竞赛名
    pub competition: Option<String>,

    pub review_status: ReviewStatus,
    /// 以下评级字段仅在审核通过且标准竞赛挂接了评级条目时出现
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_level_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_level: Option<i32>,

    pub images: Vec<Image>,
}

#[derive(Debug, Serialize)]
pub struct RecordListResponse {
    pub records: Vec<RecordDetail>,
    pub pagination: PaginationInfo,
}
