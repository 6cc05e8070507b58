//! 业务错误码
//!
//! 与 HTTP 状态码配合使用，便于前端精确区分错误类型。

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    Conflict = 1004,
    InternalServerError = 1005,

    // 校验错误
    ValidationFailed = 2000,

    // 记录 / 审核
    RecordNotFound = 3000,
    ReviewNotWaiting = 3001,
    RatingInfoRequired = 3002,
    CompetitionNotFound = 3003,
    CompetitionConflict = 3004,
    RatingInfoNotFound = 3005,

    // 目录数据
    CollegeNotFound = 4000,
    SubjectNotFound = 4001,
    ClassNotFound = 4002,
    StudentNotFound = 4003,
    TeacherNotFound = 4004,

    // 账号
    UserNotFound = 5000,
    UserAlreadyExists = 5001,
    StudentAlreadyBound = 5002,
    TeacherAlreadyBound = 5003,
    LoginFailed = 5004,

    // 文件
    FileUploadFailed = 6000,
    FileTypeNotAllowed = 6001,
    FileSizeExceeded = 6002,
    FileNotFound = 6003,
    MultifileUploadNotAllowed = 6004,
    ImageCategoryInvalid = 6005,
}
