use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static CARD_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("Invalid card id regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：4 <= x <= 32
    if username.len() < 4 || username.len() > 32 {
        return Err("Username length must be between 4 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

/// 学号 / 工号校验：字母数字，长度不超过 32
pub fn validate_card_id(card_id: &str) -> Result<(), &'static str> {
    if card_id.is_empty() || card_id.len() > 32 {
        return Err("Card id length must be between 1 and 32 characters");
    }
    if !CARD_ID_RE.is_match(card_id) {
        return Err("Card id must contain only letters and numbers");
    }
    Ok(())
}

/// 姓名校验：非空，不超过 16 字符
pub fn validate_person_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name must not be blank");
    }
    if name.chars().count() > 16 {
        return Err("Name must be at most 16 characters");
    }
    Ok(())
}

/// 年级校验：不早于 1995 级
pub fn validate_grade(grade: i32) -> Result<(), &'static str> {
    if grade < 1995 {
        return Err("Grade must be 1995 or later");
    }
    Ok(())
}

/// 班号校验：从 1 开始
pub fn validate_class_number(number: i32) -> Result<(), &'static str> {
    if number < 1 {
        return Err("Class number must be at least 1");
    }
    Ok(())
}

/// 目录名称校验（学院 / 专业 / 赛事等）：非空，不超过 128 字符
pub fn validate_directory_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name must not be blank");
    }
    if name.chars().count() > 128 {
        return Err("Name must be at most 128 characters");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        assert!(validate_card_id("20210001").is_ok());
        assert!(validate_card_id("T2021a").is_ok());
        assert!(validate_card_id("").is_err());
        assert!(validate_card_id("2021-0001").is_err());
    }

    #[test]
    fn test_grade_and_number() {
        assert!(validate_grade(2021).is_ok());
        assert!(validate_grade(1994).is_err());
        assert!(validate_class_number(1).is_ok());
        assert!(validate_class_number(0).is_err());
    }

    #[test]
    fn test_person_name() {
        assert!(validate_person_name("张三").is_ok());
        assert!(validate_person_name("  ").is_err());
        assert!(validate_person_name(&"甲".repeat(17)).is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_weak_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }

    #[test]
    fn test_password_missing_classes() {
        assert!(!validate_password("abcd1234").is_valid);
        assert!(!validate_password("ABCD1234").is_valid);
        assert!(!validate_password("AbcdEfgh").is_valid);
    }
}
