//! 사용자별 활성 토큰 레코드
//!
//! 한 사용자에게 현재 유효한 액세스/리프레시 토큰 쌍과 만료 시각을 담는 불변 값 객체입니다.
//! 레지스트리 저장소만 이 값을 보관하며, 같은 사용자명으로 새 레코드가 저장되면
//! 이전 레코드는 대체(superseded)됩니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::errors::{AppError, AppResult};
use super::token::TokenType;

/// 사용자 한 명의 현재 토큰 쌍
///
/// 직렬화 시 모든 시각 필드는 ISO-8601(RFC 3339) 문자열로 기록됩니다.
///
/// 불변식: `issued_at <= access_expires_at <= refresh_expires_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
}

impl TokenRecord {
    /// 시각 불변식을 검증하며 레코드를 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 시각 순서가 `issued_at <= access <= refresh`를 만족하지 않음
    pub fn new(
        username: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        issued_at: DateTime<Utc>,
        access_expires_at: DateTime<Utc>,
        refresh_expires_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if !(issued_at <= access_expires_at && access_expires_at <= refresh_expires_at) {
            return Err(AppError::ValidationError(format!(
                "토큰 만료 시각 순서가 올바르지 않습니다 (issued_at={}, access={}, refresh={})",
                issued_at, access_expires_at, refresh_expires_at
            )));
        }

        Ok(Self {
            username: username.into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            access_expires_at,
            refresh_expires_at,
            issued_at,
        })
    }

    /// 레코드에 보관된 해당 용도의 토큰
    pub fn token_for(&self, token_type: TokenType) -> &str {
        match token_type {
            TokenType::Access => &self.access_token,
            TokenType::Refresh => &self.refresh_token,
        }
    }

    /// 제시된 토큰이 이 레코드의 현재 토큰과 정확히 일치하는지 확인
    ///
    /// 불일치는 더 새로운 쌍이 발급되어 제시된 토큰이 대체되었다는 뜻입니다.
    pub fn holds(&self, token_type: TokenType, token: &str) -> bool {
        self.token_for(token_type) == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(now: DateTime<Utc>) -> TokenRecord {
        TokenRecord::new(
            "alice",
            "access-1",
            "refresh-1",
            now,
            now + Duration::minutes(15),
            now + Duration::days(7),
        )
        .unwrap()
    }

    #[test]
    fn test_record_rejects_out_of_order_timestamps() {
        let now = Utc::now();

        let result = TokenRecord::new("alice", "a", "r", now, now + Duration::days(2), now + Duration::days(1));
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let result = TokenRecord::new("alice", "a", "r", now, now - Duration::seconds(1), now + Duration::days(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_record_serializes_timestamps_as_iso8601() {
        let now = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z").unwrap().with_timezone(&Utc);
        let record = sample(now);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["issued_at"], "2024-05-01T12:00:00Z");
        assert_eq!(json["access_expires_at"], "2024-05-01T12:15:00Z");

        let restored: TokenRecord = serde_json::from_value(json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_record_holds_matches_by_type() {
        let record = sample(Utc::now());

        assert!(record.holds(TokenType::Access, "access-1"));
        assert!(record.holds(TokenType::Refresh, "refresh-1"));
        assert!(!record.holds(TokenType::Access, "refresh-1"));
        assert!(!record.holds(TokenType::Refresh, "refresh-0"));
    }
}
