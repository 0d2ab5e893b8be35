//! 캐싱 계층 모듈
//!
//! Redis 연결과 JSON 기반 값 저장을 담당합니다.
//! 토큰 레지스트리의 Redis 저장소가 이 클라이언트를 사용합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::connect(&registry_config.redis).await?;
//! cache.set_ex("auth:revoked:9f86d0...", "1", 900).await?;
//! assert!(cache.exists("auth:revoked:9f86d0...").await?);
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_HOST=127.0.0.1
//! REDIS_PORT=6379
//! REDIS_DB=0
//! ```

pub mod redis;
