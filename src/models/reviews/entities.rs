use serde::{Deserialize, Serialize};

// 审核状态机：
//
//   WAITING ──→ PASSED
//      │  ↖────────┘ （提交者修改记录后强制回到 WAITING）
//      └────→ NOT_PASS
//
// 线上序列化格式沿用大写下划线风格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    #[serde(rename = "WAITING")]
    Waiting,
    #[serde(rename = "PASSED")]
    Passed,
    #[serde(rename = "NOT_PASS")]
    NotPass,
}

impl ReviewStatus {
    pub const WAITING: &'static str = "WAITING";
    pub const PASSED: &'static str = "PASSED";
    pub const NOT_PASS: &'static str = "NOT_PASS";
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::Waiting => write!(f, "{}", ReviewStatus::WAITING),
            ReviewStatus::Passed => write!(f, "{}", ReviewStatus::PASSED),
            ReviewStatus::NotPass => write!(f, "{}", ReviewStatus::NOT_PASS),
        }
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(ReviewStatus::Waiting),
            "PASSED" => Ok(ReviewStatus::Passed),
            "NOT_PASS" => Ok(ReviewStatus::NotPass),
            _ => Err(format!("Invalid review status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_wire_spelling_roundtrip() {
        for (status, s) in [
            (ReviewStatus::Waiting, "WAITING"),
            (ReviewStatus::Passed, "PASSED"),
            (ReviewStatus::NotPass, "NOT_PASS"),
        ] {
            assert_eq!(status.to_string(), s);
            assert_eq!(ReviewStatus::from_str(s).unwrap(), status);
        }
        assert!(ReviewStatus::from_str("REJECTED").is_err());
    }

    #[test]
    fn test_serde_rename() {
        let json = serde_json::to_string(&ReviewStatus::NotPass).unwrap();
        assert_eq!(json, "\"NOT_PASS\"");
        let back: ReviewStatus = serde_json::from_str("\"PASSED\"").unwrap();
        assert_eq!(back, ReviewStatus::Passed);
    }
}
