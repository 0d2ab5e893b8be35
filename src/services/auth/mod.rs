//! 인증 토큰 서비스 모듈
//!
//! JWT 토큰의 발급, 검증, 갱신, 폐기와 이를 뒷받침하는 토큰 레지스트리를 제공합니다.
//!
//! # Features
//!
//! - 액세스/리프레시 토큰 쌍 발급 (HMAC 서명, `type` 클레임으로 구분)
//! - 서명/만료/폐기/대체 여부를 모두 확인하는 토큰 검증
//! - 사용자 단위 로그아웃과 개별 토큰 폐기
//! - 정책 기반 감사 로그
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{TokenAuditLogger, TokenRegistry, TokenService};
//!
//! let registry = Arc::new(TokenRegistry::from_config(&registry_config, clock.clone()).await);
//! let audit = TokenAuditLogger::new(registry_config.audit_enabled, registry_config.mask_username);
//! let service = TokenService::new(registry, audit, jwt_settings, clock)?;
//!
//! let pair = service.issue_token_pair("alice").await?;
//! let claims = service.verify_token(&pair.access_token).await?;
//! ```

pub mod token_registry;
pub mod token_audit;
pub mod token_service;

pub use token_registry::*;
pub use token_audit::*;
pub use token_service::*;
