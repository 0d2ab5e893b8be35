//! # Authentication Configuration Module
//!
//! JWT 서명 및 토큰 수명 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_ALGORITHM="HS256"          # HS256 | HS384 | HS512
//! export JWT_ACCESS_TTL_MINUTES="15"
//! export JWT_REFRESH_TTL_DAYS="7"
//! ```
//!
//! ## 권장 설정값
//!
//! - **개발**: 액세스 토큰 60분, 리프레시 토큰 7일
//! - **프로덕션**: 액세스 토큰 15분, 리프레시 토큰 30일
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::JwtSettings;
//!
//! let jwt = JwtSettings::from_env()?;
//! let expires_at = Utc::now() + jwt.access_token_ttl;
//! ```

use std::str::FromStr;
use chrono::Duration;
use jsonwebtoken::Algorithm;
use crate::errors::{AppError, AppResult};
use super::lookup::{self, Lookup};

/// 개발용 기본 비밀키 (프로덕션 사용 금지)
const DEV_SECRET: &str = "your-secret-key";

/// JWT 토큰 설정
///
/// 액세스 토큰과 리프레시 토큰은 같은 비밀키와 알고리즘으로 서명되며,
/// `type` 클레임으로만 구분됩니다.
#[derive(Clone)]
pub struct JwtSettings {
    /// HMAC 서명 비밀키
    pub secret: String,
    /// 서명 알고리즘 (HMAC 계열만 허용)
    pub algorithm: Algorithm,
    /// 액세스 토큰 수명
    pub access_token_ttl: Duration,
    /// 리프레시 토큰 수명
    pub refresh_token_ttl: Duration,
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 비밀키는 출력하지 않음
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}

impl JwtSettings {
    /// 환경 변수에서 JWT 설정을 읽고 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 지원하지 않는 알고리즘, 잘못된 수명 설정
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(&lookup::process_env)
    }

    /// 임의의 조회 함수에서 JWT 설정을 읽고 검증합니다.
    ///
    /// `JWT_SECRET`이 설정되지 않은 경우 개발용 기본값을 사용하며 경고 로그를 남깁니다.
    pub fn from_lookup(lookup: Lookup<'_>) -> AppResult<Self> {
        let secret = lookup::optional(lookup, "JWT_SECRET").unwrap_or_else(|| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEV_SECRET.to_string()
        });

        let algorithm_name = lookup::string_or(lookup, "JWT_ALGORITHM", "HS256");
        let algorithm = Algorithm::from_str(&algorithm_name.to_uppercase()).map_err(|_| {
            AppError::ConfigError(format!("지원하지 않는 JWT 알고리즘입니다: {}", algorithm_name))
        })?;

        let settings = Self {
            secret,
            algorithm,
            access_token_ttl: Duration::minutes(lookup::parse_or(lookup, "JWT_ACCESS_TTL_MINUTES", 15i64)),
            refresh_token_ttl: Duration::days(lookup::parse_or(lookup, "JWT_REFRESH_TTL_DAYS", 7i64)),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// 설정값의 일관성을 검증합니다.
    ///
    /// - 비밀키는 비어 있을 수 없음
    /// - 공유 비밀키 방식이므로 HMAC 알고리즘(HS256/HS384/HS512)만 허용
    /// - 두 수명 모두 양수이고, 액세스 토큰 수명 ≤ 리프레시 토큰 수명
    pub fn validate(&self) -> AppResult<()> {
        if self.secret.is_empty() {
            return Err(AppError::ConfigError("JWT_SECRET은(는) 비어 있을 수 없습니다".to_string()));
        }
        if !matches!(self.algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(AppError::ConfigError(format!(
                "HMAC 알고리즘만 지원합니다: {:?}", self.algorithm
            )));
        }
        if self.access_token_ttl <= Duration::zero() || self.refresh_token_ttl <= Duration::zero() {
            return Err(AppError::ConfigError("토큰 수명은 양수여야 합니다".to_string()));
        }
        if self.access_token_ttl > self.refresh_token_ttl {
            return Err(AppError::ConfigError(
                "액세스 토큰 수명이 리프레시 토큰 수명보다 길 수 없습니다".to_string()
            ));
        }
        Ok(())
    }

    /// 개발 환경 기본 비밀키를 사용 중인지 여부
    pub fn uses_development_secret(&self) -> bool {
        self.secret == DEV_SECRET
    }
}
