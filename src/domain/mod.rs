//! # Domain Layer Module
//!
//! 토큰 레지스트리 서비스의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Models   - 토큰 클레임, 토큰 쌍, 활성 토큰 레코드, 인증된 사용자
//! └── DTOs     - HTTP 요청/응답 계약
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, Caching)
//! ```
//!
//! 도메인 타입은 저장소나 HTTP 프레임워크를 알지 못합니다.
//! 예외는 [`AuthenticatedUser`]의 `FromRequest` 구현 하나뿐입니다.

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::auth::*;
pub use models::token::*;
