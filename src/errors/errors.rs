//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 토큰 레지스트리 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! 에러는 두 갈래로 나뉩니다.
//!
//! - [`AppError`] - 저장소, 설정, 검증 등 일반적인 실패
//! - [`TokenError`] - 토큰 검증 결과 (무효 / 만료 / 폐기)
//!
//! 토큰 검증 실패는 내부적으로 원인을 구분하지만, HTTP 계층으로 넘어갈 때는
//! 모두 같은 401 응답으로 변환되어 거부 사유가 클라이언트에 노출되지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{AppError, TokenError};
//!
//! async fn whoami(service: &TokenService, token: &str) -> Result<String, AppError> {
//!     // TokenError -> AppError::AuthenticationError 로 자동 변환
//!     let claims = service.verify_token(token).await?;
//!     Ok(claims.sub)
//! }
//! ```

use thiserror::Error;

/// 클라이언트에게 노출되는 단일 인증 실패 메시지
pub const UNAUTHENTICATED_MESSAGE: &str = "유효하지 않거나 폐기된 토큰입니다";

/// 애플리케이션 전역 에러 타입
///
/// 서비스에서 발생할 수 있는 일반적인 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// Redis 저장소 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 설정값 검증 에러 (500 Internal Server Error, 주로 기동 시점)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::RedisError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON 처리 실패: {}", err))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

/// 서명은 유효하지만 레지스트리가 토큰을 거부한 원인
///
/// 로깅과 디버깅에만 사용되며, 호출자에게는 모두 동일한 "폐기됨"으로 보입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationCause {
    /// 토큰 해시에 폐기 마커가 존재
    Marked,
    /// 해당 사용자의 활성 세션 레코드가 없음 (로그아웃 또는 만료)
    NoActiveSession,
    /// 더 새로운 토큰 쌍이 발급되어 대체됨
    Superseded,
}

impl RevocationCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevocationCause::Marked => "marked",
            RevocationCause::NoActiveSession => "no_active_session",
            RevocationCause::Superseded => "superseded",
        }
    }
}

/// 토큰 검증 결과 에러
///
/// `Invalid`/`Expired`는 JWT 자체의 문제이고, `Revoked`는 레지스트리 판단입니다.
/// 저장소 장애는 `Backend`로 감싸서 그대로 전파합니다.
#[derive(Error, Debug)]
pub enum TokenError {
    /// 서명 불일치, 형식 오류, 필수 클레임 누락
    #[error("invalid token: {0}")]
    Invalid(String),

    /// `exp` 경과
    #[error("token expired")]
    Expired,

    /// 레지스트리에 의해 거부됨
    #[error("token revoked ({})", .0.as_str())]
    Revoked(RevocationCause),

    /// 저장소 장애 등 검증과 무관한 실패
    #[error(transparent)]
    Backend(#[from] AppError),
}

impl TokenError {
    /// 호출자 관점에서 "인증되지 않음"으로 처리해야 하는 에러인지 여부
    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, TokenError::Backend(_))
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Backend(inner) => inner,
            _ => AppError::AuthenticationError(UNAUTHENTICATED_MESSAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("username은(는) 필수입니다".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_redis_error_response() {
        let error = AppError::RedisError("connection reset".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        assert!(app_result.is_err());
        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }

    #[test]
    fn test_token_errors_collapse_to_one_message() {
        // 거부 사유와 관계없이 같은 메시지여야 함
        let causes = [
            TokenError::Invalid("bad signature".to_string()),
            TokenError::Expired,
            TokenError::Revoked(RevocationCause::Marked),
            TokenError::Revoked(RevocationCause::NoActiveSession),
            TokenError::Revoked(RevocationCause::Superseded),
        ];

        for cause in causes {
            assert!(cause.is_unauthenticated());
            match AppError::from(cause) {
                AppError::AuthenticationError(msg) => assert_eq!(msg, UNAUTHENTICATED_MESSAGE),
                other => panic!("Expected AuthenticationError, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_backend_token_error_passes_through() {
        let err = TokenError::Backend(AppError::RedisError("down".to_string()));
        assert!(!err.is_unauthenticated());

        assert!(matches!(AppError::from(err), AppError::RedisError(msg) if msg == "down"));
    }
}
