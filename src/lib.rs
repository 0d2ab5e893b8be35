//! 토큰 세션 레지스트리 서비스
//!
//! 발급된 JWT 중 무엇이 아직 유효한지를 관리하는 인증 토큰 서비스입니다.
//! 토큰 쌍 발급, 검증, 갱신, 로그아웃과 함께 저장소(Redis 또는 프로세스 메모리)에
//! 사용자별 활성 세션과 폐기 마커를 TTL 기반으로 보관합니다.
//!
//! # Features
//!
//! - **JWT 인증**: 액세스/리프레시 토큰 쌍, HMAC 서명
//! - **토큰 레지스트리**: 폐기, 로그아웃, 새 쌍 발급 시 이전 쌍 대체
//! - **Redis**: 다중 인스턴스 간 상태 공유, 키별 TTL
//! - **메모리 대체 저장소**: Redis 연결 실패 시 자동 전환, 백그라운드 만료 정리
//! - **감사 로그**: `token_audit` 로그 타깃, 사용자명 마스킹 정책
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← TokenService, TokenRegistry, TokenAuditLogger
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← TokenStore (Redis / Memory)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use token_registry_service::services::auth::{TokenAuditLogger, TokenRegistry, TokenService};
//! use token_registry_service::utils::clock::SystemClock;
//!
//! let clock = Arc::new(SystemClock);
//! let registry = Arc::new(TokenRegistry::from_config(&registry_config, clock.clone()).await);
//! registry.startup().await;
//!
//! let service = TokenService::new(registry.clone(), audit, jwt_settings, clock)?;
//! let pair = service.issue_token_pair("alice").await?;
//! service.logout("alice").await?;
//!
//! registry.shutdown().await;
//! ```

pub mod config;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
