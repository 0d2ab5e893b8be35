//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 토큰 추출 및 `TokenService::verify_token` 검증
//! - 사용자 정보를 request extension에 저장
//! - 모든 인증 실패에 같은 401 응답
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new()
//!     .app_data(token_service.clone())
//!     .service(
//!         web::scope("/api/v1/auth")
//!             .service(
//!                 web::resource("/me")
//!                     .wrap(AuthMiddleware::required())
//!                     .route(web::get().to(me))
//!             )
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
