//! JWT 인증 토큰 클레임 및 페어링 된 세트
//!
//! RFC 7519 JWT 표준 클레임과 2개의 용도별 토큰을 페어링 한 정보를 표시합니다.
use serde::{Deserialize, Serialize};

/// 토큰 용도
///
/// 액세스/리프레시 토큰은 같은 키로 서명되므로 `type` 클레임으로만 구분됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// API 접근용 단기 토큰
    Access,
    /// 토큰 갱신용 장기 토큰
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자명)
/// - `type`: 토큰 용도 (`access` / `refresh`)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
/// - `jti`: 토큰 고유 ID (같은 초에 발급된 토큰도 서로 다른 문자열이 되도록)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (사용자명)
    pub sub: String,
    /// 토큰 용도
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// 토큰 고유 ID (UUID v4)
    pub jti: String,
}

/// JWT 토큰 쌍 구조체
///
/// 클라이언트에게 전달되는 토큰 집합을 나타냅니다.
/// OAuth 2.0 표준의 토큰 응답 형식을 따릅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 항상 "Bearer"
    pub token_type: String,
    /// 액세스 토큰 만료까지 남은 시간 (초)
    pub expires_in: i64,
    /// 리프레시 토큰 만료까지 남은 시간 (초)
    pub refresh_expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_use_type_claim_name() {
        let claims = TokenClaims {
            sub: "alice".to_string(),
            token_type: TokenType::Refresh,
            iat: 1_700_000_000,
            exp: 1_700_000_600,
            jti: "jti-1".to_string(),
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "refresh");
        assert_eq!(json["sub"], "alice");
        assert!(json.get("token_type").is_none());
    }

    #[test]
    fn test_claims_without_type_are_rejected() {
        let payload = r#"{"sub":"alice","iat":1,"exp":2,"jti":"x"}"#;
        assert!(serde_json::from_str::<TokenClaims>(payload).is_err());
    }
}
