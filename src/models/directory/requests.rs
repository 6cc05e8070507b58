use serde::{Deserialize, Serialize};

use crate::models::common::pagination::PaginationQuery;

// 学院创建/更新请求，同时也是学院批量导入的行格式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeRequest {
    pub name: String,
}

// 专业创建/更新请求（college 为学院名称）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRequest {
    pub name: String,
    pub college: String,
}

// 班级创建/更新请求（subject 为专业名称）
#[derive(Debug, Clone, Deserialize)]
pub struct ClassRequest {
    pub grade: i32,
    pub number: i32,
    pub subject: String,
}

// 班级批量导入行
#[derive(Debug, Clone, Deserialize)]
pub struct ClassBatchRow {
    pub grade: i32,
    pub number: i32,
    pub subject: String,
    pub college: String,
}

// 学生创建/更新请求（clazz 为班级 ID）
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRequest {
    pub card_id: String,
    pub name: String,
    pub clazz: Option<i64>,
}

// 学生更新请求（整行覆盖，clazz 为 null 时解除班级关联）
#[derive(Debug, Clone, Deserialize)]
pub struct StudentUpdateRequest {
    pub name: String,
    pub clazz: Option<i64>,
}

// 学生批量导入行
#[derive(Debug, Clone, Deserialize)]
pub struct StudentBatchRow {
    pub card_id: String,
    pub name: String,
    pub clazz_grade: i32,
    pub clazz_number: i32,
    pub subject: String,
    pub college: String,
}

// 教师创建请求，同时也是教师批量导入的行格式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherRequest {
    pub card_id: String,
    pub name: String,
}

// 教师更新请求（工号来自路径）
#[derive(Debug, Clone, Deserialize)]
pub struct TeacherUpdateRequest {
    pub name: String,
}

// 目录数据通用查询参数（名称搜索 + 分页）
#[derive(Debug, Deserialize)]
pub struct DirectoryQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 班级查询参数
#[derive(Debug, Deserialize)]
pub struct ClassQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub grade: Option<i32>,
    pub number: Option<i32>,
    pub subject: Option<String>,
    pub college: Option<String>,
}

// 学生查询参数
#[derive(Debug, Deserialize)]
pub struct StudentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub clazz_grade: Option<i32>,
    pub clazz_number: Option<i32>,
    pub subject: Option<String>,
    pub college: Option<String>,
}
