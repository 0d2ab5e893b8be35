//! # 문자열 유틸리티
//!
//! 사용자명 검증과 환경 변수 값 정리에 사용하는 공통 함수들입니다.

use crate::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 인자
/// * `value` - 검증할 문자열
/// * `field_name` - 필드명 (에러 메시지용)
///
/// # 반환값
/// * `Ok(String)` - 정리된 유효한 문자열
/// * `Err(AppError)` - 빈 문자열이거나 공백만 있는 경우
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  alice  ", "username").unwrap(), "alice");
/// assert!(validate_required_string("   ", "username").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 옵션으로 반환합니다.
/// `REDIS_PASSWORD=` 처럼 비어 있는 환경 변수를 "설정 안 됨"으로 취급할 때 사용합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 환경 변수 스타일의 불리언 문자열 파싱
///
/// `true/false`, `1/0`, `yes/no`, `on/off` 를 대소문자 구분 없이 인식합니다.
/// 그 외의 값은 `None`을 반환합니다.
pub fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
