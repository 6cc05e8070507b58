//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_awardsys_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum AwardSysError {
            $($variant(String),)*
        }

        impl AwardSysError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AwardSysError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AwardSysError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AwardSysError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AwardSysError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AwardSysError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_awardsys_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "State Conflict"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
}

impl AwardSysError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AwardSysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AwardSysError {}

// 为常见的错误类型实现 From trait
//
// 存储层的唯一键冲突（例如并发审核同名竞赛时的 resolve-or-create 竞争）
// 必须以 Conflict 上报给调用方，而不是笼统的数据库错误。
impl From<sea_orm::DbErr> for AwardSysError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                AwardSysError::Conflict(format!("唯一键冲突: {msg}"))
            }
            _ => AwardSysError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AwardSysError {
    fn from(err: std::io::Error) -> Self {
        AwardSysError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AwardSysError {
    fn from(err: serde_json::Error) -> Self {
        AwardSysError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AwardSysError {
    fn from(err: chrono::ParseError) -> Self {
        AwardSysError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AwardSysError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AwardSysError::database_config("test").code(), "E001");
        assert_eq!(AwardSysError::validation("test").code(), "E005");
        assert_eq!(AwardSysError::conflict("test").code(), "E007");
        assert_eq!(AwardSysError::authorization("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AwardSysError::conflict("test").error_type(),
            "State Conflict"
        );
        assert_eq!(
            AwardSysError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = AwardSysError::conflict("唯一键冲突: 同名竞赛已存在");
        assert_eq!(err.message(), "唯一键冲突: 同名竞赛已存在");
    }

    #[test]
    fn test_format_simple() {
        let err = AwardSysError::not_found("award record 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("award record 42"));
    }
}
