//! 토큰 레지스트리
//!
//! 발급된 토큰 중 무엇이 아직 유효한지에 대한 권위 있는 상태를 관리합니다.
//!
//! - 사용자별 활성 레코드: 가장 최근에 발급된 토큰 쌍 하나
//! - 폐기 마커: 토큰 원문의 SHA-256 해시, 해당 토큰이 만료될 때까지 유지
//!
//! 저장소는 기동 시 한 번 선택됩니다. Redis가 설정되어 있어도 연결할 수 없으면
//! 경고를 남기고 메모리 저장소로 대체하며, 생성 자체는 실패하지 않습니다.
//!
//! ```rust,ignore
//! let registry = TokenRegistry::from_config(&registry_config, Arc::new(SystemClock)).await;
//! registry.startup().await;
//!
//! registry.persist(record).await?;
//! let revoked = registry.is_token_revoked(&access_token).await?;
//!
//! registry.shutdown().await;
//! ```

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use crate::config::{BackendKind, RegistryConfig};
use crate::domain::models::token::TokenRecord;
use crate::errors::AppResult;
use crate::repositories::tokens::{clamp_ttl, InMemoryTokenStore, RedisTokenStore, TokenStore};
use crate::utils::clock::Clock;

/// 토큰 레지스트리
pub struct TokenRegistry {
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    default_ttl_seconds: u64,
}

impl std::fmt::Debug for TokenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRegistry")
            .field("backend", &self.store.backend_name())
            .field("clock", &self.clock)
            .field("default_ttl_seconds", &self.default_ttl_seconds)
            .finish()
    }
}

impl TokenRegistry {
    /// 설정에 따라 저장소를 골라 레지스트리를 생성합니다.
    ///
    /// Redis 연결 실패는 에러가 아니라 메모리 저장소로의 대체로 처리됩니다.
    pub async fn from_config(config: &RegistryConfig, clock: Arc<dyn Clock>) -> Self {
        let store: Arc<dyn TokenStore> = match config.backend {
            BackendKind::Memory => {
                log::warn!("메모리 토큰 저장소 사용 - 재시작 시 세션이 사라지고 인스턴스 간 공유되지 않습니다");
                Arc::new(Self::memory_store(config))
            }
            BackendKind::Redis => match RedisTokenStore::connect(&config.redis, &config.key_prefix).await {
                Ok(store) => {
                    log::info!("Redis 토큰 저장소 사용 (prefix: {})", config.key_prefix);
                    Arc::new(store)
                }
                Err(e) => {
                    log::warn!(
                        "Redis 토큰 저장소 연결 실패 ({}:{}): {} - 메모리 저장소로 대체합니다",
                        config.redis.host,
                        config.redis.port,
                        e
                    );
                    Arc::new(Self::memory_store(config))
                }
            },
        };

        Self::with_store(store, clock, config.default_ttl_seconds)
    }

    /// 저장소를 직접 지정하여 레지스트리를 생성합니다.
    pub fn with_store(store: Arc<dyn TokenStore>, clock: Arc<dyn Clock>, default_ttl_seconds: u64) -> Self {
        Self {
            store,
            clock,
            default_ttl_seconds,
        }
    }

    fn memory_store(config: &RegistryConfig) -> InMemoryTokenStore {
        InMemoryTokenStore::new(Duration::from_secs(config.sweep_interval_seconds))
    }

    /// 선택된 저장소 이름 (`redis` / `memory`)
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// 토큰 만료 시각을 알 수 없을 때 사용하는 폐기 마커 TTL (초)
    pub fn default_ttl_seconds(&self) -> u64 {
        self.default_ttl_seconds
    }

    /// 저장소의 백그라운드 작업을 시작합니다. 여러 번 호출해도 안전합니다.
    pub async fn startup(&self) {
        if let Some(sweepable) = self.store.as_sweepable() {
            sweepable.start_sweep().await;
        }
    }

    /// 저장소의 백그라운드 작업을 중지하고 종료를 기다립니다. 여러 번 호출해도 안전합니다.
    pub async fn shutdown(&self) {
        if let Some(sweepable) = self.store.as_sweepable() {
            sweepable.stop_sweep().await;
        }
    }

    /// 사용자의 활성 레코드를 저장합니다. 같은 사용자의 이전 레코드는 대체됩니다.
    ///
    /// TTL은 리프레시 토큰 만료까지 남은 시간입니다.
    pub async fn persist(&self, record: TokenRecord) -> AppResult<TokenRecord> {
        let ttl = self.ttl_until(record.refresh_expires_at);
        self.store.save(&record.username, &record, ttl).await?;
        log::debug!("활성 토큰 레코드 저장 - ttl: {}초", ttl);
        Ok(record)
    }

    pub async fn read(&self, username: &str) -> AppResult<Option<TokenRecord>> {
        self.store.read(username).await
    }

    pub async fn delete(&self, username: &str) -> AppResult<()> {
        self.store.delete(username).await
    }

    /// 토큰을 만료 시각까지 폐기 처리합니다.
    pub async fn mark_revoked_token(&self, token: &str, expires_at: DateTime<Utc>) -> AppResult<()> {
        self.store
            .mark_revoked(&Self::hash_token(token), self.ttl_until(expires_at))
            .await
    }

    /// 토큰을 지정한 시간(초) 동안 폐기 처리합니다.
    pub async fn mark_revoked_for(&self, token: &str, ttl_seconds: i64) -> AppResult<()> {
        self.store.mark_revoked(&Self::hash_token(token), ttl_seconds).await
    }

    pub async fn is_token_revoked(&self, token: &str) -> AppResult<bool> {
        self.store.is_revoked(&Self::hash_token(token)).await
    }

    /// 사용자의 현재 토큰 쌍을 모두 폐기하고 활성 레코드를 삭제합니다.
    ///
    /// 폐기 마커를 먼저 기록한 뒤 레코드를 삭제합니다.
    /// 활성 레코드가 없으면 `false`를 반환합니다.
    pub async fn revoke_user(&self, username: &str) -> AppResult<bool> {
        let Some(record) = self.store.read(username).await? else {
            return Ok(false);
        };

        self.mark_revoked_token(&record.access_token, record.access_expires_at).await?;
        self.mark_revoked_token(&record.refresh_token, record.refresh_expires_at).await?;
        self.store.delete(username).await?;

        Ok(true)
    }

    /// 토큰 원문의 SHA-256 해시 (소문자 16진수)
    pub fn hash_token(token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }

    /// 현재 시각부터 `expires_at`까지 남은 초. 최소 1초
    pub fn ttl_until(&self, expires_at: DateTime<Utc>) -> i64 {
        let remaining = (expires_at - self.clock.now()).num_seconds();
        clamp_ttl(remaining) as i64
    }
}
