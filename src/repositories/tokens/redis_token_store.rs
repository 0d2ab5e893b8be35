//! Redis 기반 토큰 저장소
//!
//! Redis의 키별 TTL을 그대로 사용하므로 별도의 정리 작업이 없습니다.
//!
//! ## 키 구조
//!
//! ```text
//! <prefix>:active:<username>        → TokenRecord JSON, TTL = 리프레시 토큰 만료까지
//! <prefix>:revoked:<sha256-hex>     → "1", TTL = 해당 토큰 만료까지
//! ```

use async_trait::async_trait;
use crate::caching::redis::RedisClient;
use crate::config::RedisSettings;
use crate::domain::models::token::TokenRecord;
use crate::errors::AppResult;
use super::token_store::{clamp_ttl, TokenStore};

/// 폐기 마커 값 (존재 여부만 의미가 있음)
const REVOKED_SENTINEL: &str = "1";

/// 사용자 활성 레코드 키
pub fn active_key(prefix: &str, username: &str) -> String {
    format!("{}:active:{}", prefix, username)
}

/// 폐기 마커 키
pub fn revoked_key(prefix: &str, token_hash: &str) -> String {
    format!("{}:revoked:{}", prefix, token_hash)
}

/// Redis 토큰 저장소
#[derive(Debug, Clone)]
pub struct RedisTokenStore {
    redis: RedisClient,
    key_prefix: String,
}

impl RedisTokenStore {
    pub fn new(redis: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            redis,
            key_prefix: key_prefix.into(),
        }
    }

    /// Redis에 연결하여 저장소를 생성합니다.
    ///
    /// 연결 또는 `PING`이 실패하면 에러를 반환하여 호출자가 대체 저장소를 고를 수 있게 합니다.
    pub async fn connect(settings: &RedisSettings, key_prefix: &str) -> AppResult<Self> {
        let redis = RedisClient::connect(settings).await?;
        Ok(Self::new(redis, key_prefix))
    }
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn save(&self, username: &str, record: &TokenRecord, ttl_seconds: i64) -> AppResult<()> {
        let key = active_key(&self.key_prefix, username);
        let ttl = clamp_ttl(ttl_seconds);

        self.redis.set_with_expiry(&key, record, ttl).await?;
        log::debug!("토큰 레코드 저장 - key: {}, ttl: {}초", key, ttl);
        Ok(())
    }

    async fn read(&self, username: &str) -> AppResult<Option<TokenRecord>> {
        self.redis.get(&active_key(&self.key_prefix, username)).await
    }

    async fn delete(&self, username: &str) -> AppResult<()> {
        self.redis.del(&active_key(&self.key_prefix, username)).await
    }

    async fn mark_revoked(&self, token_hash: &str, ttl_seconds: i64) -> AppResult<()> {
        let key = revoked_key(&self.key_prefix, token_hash);
        self.redis.set_ex(&key, REVOKED_SENTINEL, clamp_ttl(ttl_seconds)).await
    }

    async fn is_revoked(&self, token_hash: &str) -> AppResult<bool> {
        self.redis.exists(&revoked_key(&self.key_prefix, token_hash)).await
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(active_key("auth", "alice"), "auth:active:alice");
        assert_eq!(
            revoked_key("myapp", "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"),
            "myapp:revoked:9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[tokio::test]
    async fn test_connect_fails_fast_when_unreachable() {
        let settings = RedisSettings {
            host: "127.0.0.1".to_string(),
            port: 1,
            connect_timeout_seconds: 1,
            ..RedisSettings::default()
        };

        assert!(RedisTokenStore::connect(&settings, "auth").await.is_err());
    }
}
