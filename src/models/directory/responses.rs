use serde::Serialize;

use super::entities::{Class, College, Student, Subject, Teacher};
use crate::models::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct CollegeListResponse {
    pub items: Vec<College>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct ClassListResponse {
    pub items: Vec<Class>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct StudentListResponse {
    pub items: Vec<Student>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct TeacherListResponse {
    pub items: Vec<Teacher>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct CollegeBatchResponse {
    pub results: Vec<College>,
}

// 专业批量导入结果行沿用实体，college 为该专业实际所属的学院名称
#[derive(Debug, Serialize)]
pub struct SubjectBatchResponse {
    pub results: Vec<Subject>,
}

// 班级批量导入结果行：college 为该专业实际所属的学院名称，
// 专业已存在时可能与输入不同。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassBatchResult {
    pub grade: i32,
    pub number: i32,
    pub subject: String,
    pub college: String,
}

// 学生批量导入结果行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentBatchResult {
    pub card_id: String,
    pub name: String,
    pub grade: i32,
    pub number: i32,
    pub subject: String,
    pub college: String,
}

#[derive(Debug, Serialize)]
pub struct ClassBatchResponse {
    pub results: Vec<ClassBatchResult>,
}

#[derive(Debug, Serialize)]
pub struct StudentBatchResponse {
    pub results: Vec<StudentBatchResult>,
}

#[derive(Debug, Serialize)]
pub struct TeacherBatchResponse {
    pub results: Vec<Teacher>,
}
