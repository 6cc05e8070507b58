use serde::Deserialize;

use super::entities::ReviewStatus;

/// 管理员审核结论
///
/// 审核通过时：`competition` 指定规范化赛事名（缺省为记录快照里的赛事名），
/// `rating_info` 指定评级条目；若目标赛事尚不存在则必须携带 `rating_info`。
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewUpdateRequest {
    pub status: ReviewStatus,
    pub competition: Option<String>,
    pub rating_info: Option<String>,
}
