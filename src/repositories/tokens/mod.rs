//! 토큰 저장소 모듈
//!
//! 토큰 레지스트리가 사용하는 저장소 추상화와 두 가지 구현을 제공합니다.
//!
//! # Features
//!
//! - **Redis 저장소**: 키별 TTL로 자동 만료, 다중 인스턴스 간 상태 공유
//! - **메모리 저장소**: Redis를 쓸 수 없을 때의 대체 저장소, 주기적 정리 작업 포함
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::repositories::tokens::{InMemoryTokenStore, TokenStore};
//!
//! let store = InMemoryTokenStore::new(Duration::from_secs(60));
//! store.save("alice", &record, 604800).await?;
//! store.mark_revoked(&token_hash, 900).await?;
//! ```

pub mod token_store;
pub mod redis_token_store;
pub mod memory_token_store;

pub use token_store::*;
pub use redis_token_store::RedisTokenStore;
pub use memory_token_store::{InMemoryTokenStore, MemoryStoreStats};
