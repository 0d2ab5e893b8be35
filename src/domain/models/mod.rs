//! 도메인 모델
//!
//! 토큰 관련 값 객체와 요청 단위 인증 정보를 담습니다.

pub mod auth;
pub mod token;
