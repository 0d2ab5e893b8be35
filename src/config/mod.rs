//! # Configuration Module
//!
//! 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 타입 있는 구조체로 읽어 기동 시 한 번 검증합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩 설정
//! - [`auth_config`] - JWT 서명 및 토큰 수명 설정
//! - [`registry_config`] - 토큰 저장소 선택, Redis 연결, 감사 로그 정책
//! - [`lookup`] - 환경 변수/테스트용 키 조회 헬퍼
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리 (Environment Separation)
//!
//! `PROFILE`에 따라 `.env.dev` / `.env.prod`를 로드하고,
//! `ENVIRONMENT` 값에 따라 일부 기본값(감사 로그 사용자명 마스킹 등)이 달라집니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! - 비밀키, Redis 비밀번호는 `Debug` 출력에서 가려짐
//! - `JWT_SECRET` 미설정 시 경고 로그 출력
//!
//! ### 3. 타입 안전성 (Type Safety)
//!
//! - 파싱 불가능한 값은 에러 로그 후 기본값 사용
//! - 의미적으로 잘못된 값(0초 주기, 빈 prefix 등)은 `AppError::ConfigError`
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{JwtSettings, RegistryConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let registry = RegistryConfig::from_env()?;
//! let jwt = JwtSettings::from_env()?;
//! ```

pub mod lookup;
pub mod data_config;
pub mod auth_config;
pub mod registry_config;

pub use data_config::*;
pub use auth_config::*;
pub use registry_config::*;
