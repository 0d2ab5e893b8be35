//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 불리언 플래그 파싱
//! - [`clock`] - 주입 가능한 시계 (운영용 / 테스트용)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::validate_required_string;
//! use crate::utils::clock::{Clock, SystemClock};
//!
//! let username = validate_required_string("  alice  ", "username")?;
//! let now = SystemClock.now();
//! ```

pub mod string_utils;
pub mod clock;
