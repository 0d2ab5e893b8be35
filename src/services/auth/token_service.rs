//! JWT 토큰 발급/검증 서비스
//!
//! 액세스 토큰과 리프레시 토큰의 생성, 검증, 갱신, 폐기를 담당하며
//! 모든 판단에서 토큰 레지스트리를 참조합니다.
//!
//! ## 토큰 상태
//!
//! ```text
//! issued ──▶ active ──┬──▶ expired      (exp 경과)
//!                     ├──▶ revoked      (로그아웃, 명시적 폐기)
//!                     └──▶ superseded   (같은 사용자에게 새 쌍 발급)
//! ```
//!
//! ## 검증 순서
//!
//! 1. 서명/형식/필수 클레임 → [`TokenError::Invalid`]
//! 2. `exp <= now` → [`TokenError::Expired`]
//! 3. 폐기 마커 존재 → `Revoked(Marked)`
//! 4. 활성 레코드 없음 → `Revoked(NoActiveSession)`
//! 5. 활성 레코드의 같은 용도 토큰과 불일치 → `Revoked(Superseded)`

use std::sync::Arc;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use crate::config::JwtSettings;
use crate::domain::models::token::{TokenClaims, TokenPair, TokenRecord, TokenType};
use crate::errors::{AppError, AppResult, ErrorContext, RevocationCause, TokenError};
use crate::utils::clock::Clock;
use crate::utils::string_utils::validate_required_string;
use super::token_audit::{AuditEvent, TokenAuditLogger};
use super::token_registry::TokenRegistry;

/// JWT 토큰 관리 서비스
///
/// 같은 비밀키와 알고리즘으로 두 종류의 토큰을 서명하고 `type` 클레임으로 구분합니다.
pub struct TokenService {
    registry: Arc<TokenRegistry>,
    audit: TokenAuditLogger,
    jwt: JwtSettings,
    clock: Arc<dyn Clock>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("registry", &self.registry)
            .field("audit", &self.audit)
            .field("jwt", &self.jwt)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// # Errors
    ///
    /// * `AppError::ConfigError` - JWT 설정 검증 실패
    pub fn new(
        registry: Arc<TokenRegistry>,
        audit: TokenAuditLogger,
        jwt: JwtSettings,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        jwt.validate()?;

        let encoding_key = EncodingKey::from_secret(jwt.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(jwt.secret.as_bytes());

        Ok(Self {
            registry,
            audit,
            jwt,
            clock,
            encoding_key,
            decoding_key,
        })
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// 사용자에게 새 토큰 쌍을 발급하고 레지스트리에 저장합니다.
    ///
    /// 같은 사용자의 이전 토큰 쌍은 이 시점부터 대체(superseded)됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 사용자명이 비어 있음
    /// * `AppError::RedisError` - 저장소 실패
    pub async fn issue_token_pair(&self, username: &str) -> AppResult<TokenPair> {
        let username = validate_required_string(username, "username")?;
        let pair = self.mint_pair(&username).await?;

        self.audit.record(
            AuditEvent::Login,
            &username,
            &[("backend", self.registry.backend_name().to_string())],
        );
        Ok(pair)
    }

    /// 토큰을 검증하고 클레임을 반환합니다.
    ///
    /// 거부 사유는 debug 로그로만 남고, 호출자에게는 [`TokenError`]로 전달됩니다.
    pub async fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let result = self.check_token(token).await;

        if let Err(e) = &result {
            if e.is_unauthenticated() {
                log::debug!("토큰 거부: {}", e);
            } else {
                log::error!("토큰 검증 중 저장소 오류: {}", e);
            }
        }
        result
    }

    async fn check_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = self.decode(token)?;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(TokenError::Expired);
        }

        if self.registry.is_token_revoked(token).await? {
            return Err(TokenError::Revoked(RevocationCause::Marked));
        }

        let Some(record) = self.registry.read(&claims.sub).await? else {
            return Err(TokenError::Revoked(RevocationCause::NoActiveSession));
        };

        if !record.holds(claims.token_type, token) {
            return Err(TokenError::Revoked(RevocationCause::Superseded));
        }

        Ok(claims)
    }

    /// 리프레시 토큰으로 새 토큰 쌍을 발급합니다.
    ///
    /// 제시된 토큰은 전체 검증을 통과해야 하며 `type`이 `refresh`여야 합니다.
    /// 새 쌍이 저장되면서 이전 쌍은 모두 대체됩니다.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, TokenError> {
        let claims = self.verify_token(refresh_token).await?;

        if claims.token_type != TokenType::Refresh {
            log::debug!("토큰 거부: refresh 요청에 {} 토큰 사용", claims.token_type.as_str());
            return Err(TokenError::Invalid("refresh 토큰이 아닙니다".to_string()));
        }

        let pair = self.mint_pair(&claims.sub).await?;
        self.audit.record(AuditEvent::Refresh, &claims.sub, &[]);
        Ok(pair)
    }

    /// 사용자의 현재 세션을 폐기합니다.
    ///
    /// 활성 세션이 없으면 `false`를 반환하며 에러가 아닙니다.
    pub async fn logout(&self, username: &str) -> AppResult<bool> {
        let revoked = self.registry.revoke_user(username).await?;
        self.audit.record(AuditEvent::Logout, username, &[("revoked", revoked.to_string())]);
        Ok(revoked)
    }

    /// 개별 토큰을 폐기합니다.
    ///
    /// 서명은 확인하지만 만료 여부는 보지 않으며 레지스트리도 참조하지 않습니다.
    /// 토큰의 `exp`를 읽을 수 없으면 기본 TTL 동안 폐기 처리합니다.
    /// 같은 토큰을 여러 번 폐기해도 결과는 같습니다.
    pub async fn revoke_token(&self, token: &str) -> AppResult<()> {
        let expiry = self
            .decode(token)
            .ok()
            .and_then(|claims| DateTime::<Utc>::from_timestamp(claims.exp, 0).map(|exp| (claims.sub, exp)));

        match expiry {
            Some((username, expires_at)) => {
                self.registry.mark_revoked_token(token, expires_at).await?;
                self.audit.record(
                    AuditEvent::Revoke,
                    &username,
                    &[("ttl", self.registry.ttl_until(expires_at).to_string())],
                );
            }
            None => {
                let ttl = self.registry.default_ttl_seconds();
                self.registry
                    .mark_revoked_for(token, i64::try_from(ttl).unwrap_or(i64::MAX))
                    .await?;
                self.audit.record(
                    AuditEvent::Revoke,
                    "-",
                    &[("ttl", ttl.to_string()), ("decoded", "false".to_string())],
                );
            }
        }
        Ok(())
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 헤더 형식 또는 빈 토큰
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = token_service.extract_bearer_token("Bearer eyJhbGciOiJIUzI1NiIs...")?;
    /// let claims = token_service.verify_token(token).await?;
    /// ```
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        match auth_header.strip_prefix("Bearer ").map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
        }
    }

    async fn mint_pair(&self, username: &str) -> AppResult<TokenPair> {
        let now = self.clock.now();
        let access_expires_at = now + self.jwt.access_token_ttl;
        let refresh_expires_at = now + self.jwt.refresh_token_ttl;

        let access_token = self.encode(username, TokenType::Access, now, access_expires_at)?;
        let refresh_token = self.encode(username, TokenType::Refresh, now, refresh_expires_at)?;

        let record = TokenRecord::new(
            username,
            access_token,
            refresh_token,
            now,
            access_expires_at,
            refresh_expires_at,
        )?;
        let record = self.registry.persist(record).await?;

        Ok(TokenPair {
            access_token: record.access_token,
            refresh_token: record.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.access_token_ttl.num_seconds(),
            refresh_expires_in: self.jwt.refresh_token_ttl.num_seconds(),
        })
    }

    fn encode(
        &self,
        username: &str,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> AppResult<String> {
        let claims = TokenClaims {
            sub: username.to_string(),
            token_type,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(self.jwt.algorithm), &claims, &self.encoding_key)
            .with_context(|| format!("{} 토큰 생성 실패", token_type.as_str()))
    }

    /// 서명과 클레임 형식만 확인합니다. 만료는 주입된 시계로 따로 판단합니다.
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.jwt.algorithm);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}
