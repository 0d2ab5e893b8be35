//! # Redis 클라이언트 구현
//!
//! 토큰 레지스트리의 Redis 저장소가 사용하는 얇은 클라이언트 래퍼입니다.
//! JSON 직렬화, TTL 설정, 키 존재 여부 확인 같은 레지스트리에 필요한 명령만 노출합니다.
//!
//! ## 연결 관리
//!
//! `redis::aio::ConnectionManager`를 사용하여 단일 멀티플렉싱 연결을 공유하고,
//! 연결이 끊어지면 다음 명령에서 자동으로 재연결합니다.
//! 최초 연결과 `PING` 확인은 설정된 타임아웃 안에 끝나야 합니다.

use std::time::Duration;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use crate::config::RedisSettings;
use crate::errors::{AppError, AppResult};

/// Redis 클라이언트 래퍼
///
/// `ConnectionManager`는 내부적으로 `Arc`를 공유하므로 복제 비용이 작습니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::caching::redis::RedisClient;
///
/// let redis = RedisClient::connect(&settings).await?;
/// redis.set_with_expiry("auth:active:alice", &record, 604800).await?;
/// let cached: Option<TokenRecord> = redis.get("auth:active:alice").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient").finish_non_exhaustive()
    }
}

impl RedisClient {
    /// Redis 서버에 연결하고 `PING`으로 가용성을 확인합니다.
    ///
    /// ## 에러 케이스
    ///
    /// - 잘못된 URL 형식 (`AppError::ConfigError`)
    /// - 서버에 연결할 수 없음, 인증 실패 (`AppError::RedisError`)
    /// - `connect_timeout_seconds` 안에 연결/PING이 끝나지 않음 (`AppError::RedisError`)
    pub async fn connect(settings: &RedisSettings) -> AppResult<Self> {
        let client = Client::open(settings.connection_url())
            .map_err(|e| AppError::ConfigError(format!("잘못된 Redis 연결 정보: {}", e)))?;

        let timeout = Duration::from_secs(settings.connect_timeout_seconds.max(1));

        let handshake = async {
            let mut conn = ConnectionManager::new(client).await?;
            redis::cmd("PING").query_async::<()>(&mut conn).await?;
            Ok::<_, redis::RedisError>(conn)
        };

        let conn = tokio::time::timeout(timeout, handshake)
            .await
            .map_err(|_| {
                AppError::RedisError(format!(
                    "Redis 연결 시간 초과 ({}:{}, {}초)",
                    settings.host,
                    settings.port,
                    timeout.as_secs()
                ))
            })??;

        log::info!("Redis 연결 성공: {}:{}/{}", settings.host, settings.port, settings.db);

        Ok(Self { conn })
    }

    /// JSON 으로 저장된 값을 조회하여 역직렬화합니다.
    ///
    /// - `Ok(None)` - 키가 존재하지 않음
    /// - `Err(AppError::InternalError)` - 저장된 값이 `T`로 해석되지 않음
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// 값을 JSON 으로 직렬화하여 만료 시간과 함께 저장합니다. (`SET key value EX seconds`)
    ///
    /// 기존 키가 있으면 값과 TTL 모두 덮어씁니다.
    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_ex(key, &json, seconds).await
    }

    /// 문자열 값을 그대로 만료 시간과 함께 저장합니다.
    pub async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, value, seconds).await?;
        Ok(())
    }

    /// 키를 삭제합니다. 키가 없어도 성공으로 처리합니다.
    pub async fn del(&self, key: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    /// 키 존재 여부
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        Ok(conn.exists(key).await?)
    }
}
