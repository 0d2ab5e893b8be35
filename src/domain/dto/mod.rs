//! HTTP 요청/응답 DTO
//!
//! 요청 DTO는 `validator`로 검증 규칙을 선언하고, 핸들러에서 `validate()` 결과를
//! `AppError::ValidationError`로 변환합니다.

pub mod tokens;

pub use tokens::*;
