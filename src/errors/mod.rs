//! 에러 타입 모듈
//!
//! [`AppError`] (일반 실패)와 [`TokenError`] (토큰 검증 결과)를 제공합니다.

#[allow(clippy::module_inception)]
pub mod errors;

pub use errors::*;
