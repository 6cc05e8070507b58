use serde::{Deserialize, Serialize};

// 附件类别，每条记录每个类别至多一张，重传即替换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageCategory {
    #[serde(rename = "NOTICE")]
    Notice,
    #[serde(rename = "AWARD")]
    Award,
    #[serde(rename = "LIST")]
    List,
}

impl ImageCategory {
    pub const NOTICE: &'static str = "NOTICE";
    pub const AWARD: &'static str = "AWARD";
    pub const LIST: &'static str = "LIST";

    /// 导出打包时使用的展示名
    pub fn display_name(&self) -> &'static str {
        match self {
            ImageCategory::Notice => "Notice",
            ImageCategory::Award => "Award",
            ImageCategory::List => "List",
        }
    }

    pub fn all() -> [ImageCategory; 3] {
        [ImageCategory::Notice, ImageCategory::Award, ImageCategory::List]
    }
}

impl std::fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageCategory::Notice => write!(f, "{}", ImageCategory::NOTICE),
            ImageCategory::Award => write!(f, "{}", ImageCategory::AWARD),
            ImageCategory::List => write!(f, "{}", ImageCategory::LIST),
        }
    }
}

impl std::str::FromStr for ImageCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOTICE" => Ok(ImageCategory::Notice),
            "AWARD" => Ok(ImageCategory::Award),
            "LIST" => Ok(ImageCategory::List),
            _ => Err(format!("Invalid image category: {s}")),
        }
    }
}

/// 附件业务实体
#[derive(Debug, Clone, Serialize)]
pub struct Image {
    pub id: i64,
    #[serde(rename = "award_record")]
    pub award_record_id: i64,
    pub category: ImageCategory,
    /// 存储文件名（`{record_id}-{CATEGORY}-{uuid}.{ext}`）
    pub file: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_parse() {
        assert_eq!(ImageCategory::from_str("AWARD").unwrap(), ImageCategory::Award);
        assert!(ImageCategory::from_str("award").is_err());
        assert!(ImageCategory::from_str("PHOTO").is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(ImageCategory::Notice.display_name(), "Notice");
        assert_eq!(ImageCategory::List.to_string(), "LIST");
    }
}
