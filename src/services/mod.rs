//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스 인스턴스는 `main`에서 한 번 만들어 `web::Data`로 핸들러와 미들웨어에 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = web::Data::new(TokenService::new(registry, audit, jwt, clock)?);
//! App::new().app_data(token_service.clone());
//! ```

pub mod auth;
