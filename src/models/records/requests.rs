use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::common::pagination::PaginationQuery;
use crate::models::reviews::entities::ReviewStatus;

/// 提交获奖记录（学生端）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecordRequest {
    pub works_name: Option<String>,
    pub award_level: String,
    /// 指导教师工号
    pub teacher: String,
    /// 参与学生学号列表
    pub students: Vec<String>,
    /// 主力学生学号，必须出现在 students 中
    pub main_student: String,
    pub competition_name: String,
    pub competition_category: String,
    pub hold_time: NaiveDate,
    pub organizer: String,
}

/// 修改获奖记录（提交者本人，审核状态会被重置为待审）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecordRequest {
    pub works_name: Option<String>,
    pub award_level: Option<String>,
    pub teacher: Option<String>,
    pub students: Option<Vec<String>>,
    pub main_student: Option<String>,
    pub competition_name: Option<String>,
    pub competition_category: Option<String>,
    pub hold_time: Option<NaiveDate>,
    pub organizer: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub review_status: Option<ReviewStatus>,
    /// 提交者用户 ID 过滤（管理端）
    pub submit_user: Option<i64>,
    /// update_time 下界（Unix 秒）
    pub update_time_from: Option<i64>,
    /// update_time 上界（Unix 秒）
    pub update_time_to: Option<i64>,
    /// 作品名 / 赛事名模糊搜索
    pub search: Option<String>,
}

/// 存储层建记录所需的全部数据（事务内一并落库）
#[derive(Debug, Clone)]
pub struct CreateRecordData {
    pub works_name: Option<String>,
    pub award_level: String,
    pub teacher_card_id: String,
    pub student_card_ids: Vec<String>,
    pub main_student_card_id: String,
    pub submit_user_id: i64,
    pub update_time: i64,
    pub competition_name: String,
    pub category: String,
    pub hold_time: NaiveDate,
    pub organizer: String,
}

/// 存储层部分更新数据
#[derive(Debug, Clone, Default)]
pub struct UpdateRecordData {
    pub works_name: Option<String>,
    pub award_level: Option<String>,
    pub teacher_card_id: Option<String>,
    pub student_card_ids: Option<Vec<String>>,
    pub main_student_card_id: Option<String>,
    pub update_time: i64,
    pub competition_name: Option<String>,
    pub category: Option<String>,
    pub hold_time: Option<NaiveDate>,
    pub organizer: Option<String>,
}
