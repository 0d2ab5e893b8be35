//! 토큰 도메인 모델
//!
//! - [`token`] - JWT 클레임, 토큰 용도, 클라이언트에 전달되는 토큰 쌍
//! - [`record`] - 레지스트리가 사용자별로 보관하는 활성 토큰 레코드

#[allow(clippy::module_inception)]
pub mod token;
pub mod record;

pub use token::*;
pub use record::*;
