use chrono::NaiveDate;
use serde::Serialize;

/// 赛事评级条目，以赛事名为主键
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingInfo {
    pub competition_name: String,
    pub category: String,
    pub level_title: String,
    pub level: i32,
}

/// 规范化赛事条目（审核通过时建立）
#[derive(Debug, Clone, Serialize)]
pub struct Competition {
    pub name: String,
    pub category: String,
    pub hold_time: NaiveDate,
    pub organizer: String,
    /// 挂接的评级条目赛事名
    pub rating_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_level_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_level: Option<i32>,
}

impl Competition {
    /// 展开评级投影字段
    pub fn with_rating(mut self, rating: Option<&RatingInfo>) -> Self {
        if let Some(r) = rating {
            self.rating_category = Some(r.category.clone());
            self.rating_level_title = Some(r.level_title.clone());
            self.rating_level = Some(r.level);
        }
        self
    }
}
