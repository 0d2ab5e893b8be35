//! 설정값 조회 헬퍼
//!
//! 모든 설정 구조체는 `from_env()` 외에 `from_lookup()`을 제공합니다.
//! `from_lookup()`은 임의의 키 조회 함수를 받기 때문에 테스트에서
//! 프로세스 환경 변수를 건드리지 않고 설정을 구성할 수 있습니다.

use std::fmt::Display;
use std::str::FromStr;
use crate::utils::string_utils::{clean_optional_string, parse_bool_flag};

/// 키 → 값 조회 함수
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// 프로세스 환경 변수 조회
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// 값이 비어 있으면 `None`
pub fn optional(lookup: Lookup<'_>, key: &str) -> Option<String> {
    clean_optional_string(lookup(key))
}

/// 문자열 값, 없으면 기본값
pub fn string_or(lookup: Lookup<'_>, key: &str, default: &str) -> String {
    optional(lookup, key).unwrap_or_else(|| default.to_string())
}

/// 파싱 가능한 값, 없거나 파싱 실패 시 기본값
///
/// 파싱 실패는 에러 로그를 남기고 기본값으로 계속 진행합니다.
pub fn parse_or<T>(lookup: Lookup<'_>, key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
    T::Err: Display,
{
    match optional(lookup, key) {
        Some(raw) => raw.parse::<T>().unwrap_or_else(|e| {
            log::error!("{} 파싱 실패: {}. 기본값 {} 사용", key, e, default);
            default
        }),
        None => default,
    }
}

/// 불리언 플래그, 없거나 인식 불가 시 기본값
pub fn flag_or(lookup: Lookup<'_>, key: &str, default: bool) -> bool {
    match optional(lookup, key) {
        Some(raw) => parse_bool_flag(&raw).unwrap_or_else(|| {
            log::error!("{} 파싱 실패: '{}'. 기본값 {} 사용", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        let lookup = lookup_from(&[("PORT", "not-a-number"), ("DB", "3")]);

        assert_eq!(parse_or::<u16>(&lookup, "PORT", 6379), 6379);
        assert_eq!(parse_or::<i64>(&lookup, "DB", 0), 3);
        assert_eq!(parse_or::<i64>(&lookup, "MISSING", 7), 7);
    }

    #[test]
    fn test_flag_and_string_defaults() {
        let lookup = lookup_from(&[("TLS", "yes"), ("PREFIX", "   ")]);

        assert!(flag_or(&lookup, "TLS", false));
        assert!(!flag_or(&lookup, "OTHER", false));
        assert_eq!(string_or(&lookup, "PREFIX", "auth"), "auth");
    }
}
