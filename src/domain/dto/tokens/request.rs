//! 토큰 발급/갱신 요청 DTO
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 토큰 발급 요청 DTO
///
/// 이 서비스는 자격 증명을 검증하지 않습니다. 앞단의 신원 확인이 끝난
/// 사용자명을 받아 토큰 쌍을 발급합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueTokenRequest {
    /// 토큰 주체가 될 사용자명 (1-128자, 공백 불가)
    #[validate(length(min = 1, max = 128, message = "사용자명은 1-128자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,
}

/// 토큰 갱신 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "refresh_token은(는) 필수입니다"))]
    pub refresh_token: String,
}

/// 개별 토큰 폐기 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RevokeTokenRequest {
    #[validate(length(min = 1, message = "token은(는) 필수입니다"))]
    pub token: String,
}

/// 사용자명은 레지스트리 키의 일부가 되므로 공백/제어 문자를 허용하지 않음
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명에 공백이나 제어 문자를 사용할 수 없습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_request_validation() {
        let ok = IssueTokenRequest { username: "alice".to_string() };
        assert!(ok.validate().is_ok());

        let empty = IssueTokenRequest { username: String::new() };
        assert!(empty.validate().is_err());

        let spaced = IssueTokenRequest { username: "al ice".to_string() };
        assert!(spaced.validate().is_err());
    }

    #[test]
    fn test_refresh_request_requires_token() {
        let empty = RefreshRequest { refresh_token: String::new() };
        assert!(empty.validate().is_err());

        let empty = RevokeTokenRequest { token: String::new() };
        assert!(empty.validate().is_err());
    }
}
