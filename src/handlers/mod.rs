//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) + AuthMiddleware            ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   TokenService / TokenRegistry                 ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   TokenStore (Redis / Memory)                  ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 규칙
//!
//! - 서비스는 `web::Data<TokenService>`로 주입받습니다.
//! - 요청 DTO는 `validate()` 후 실패 시 `AppError::ValidationError` (400)
//! - 서비스 에러는 `?`로 전파하여 `AppError`의 `ResponseError` 구현이 응답을 만듭니다.
//! - 보호된 핸들러는 `AuthenticatedUser` 추출자로 미들웨어가 검증한 사용자를 받습니다.
//!
//! ```rust,ignore
//! #[post("/logout", wrap = "AuthMiddleware::required()")]
//! pub async fn logout(
//!     token_service: web::Data<TokenService>,
//!     user: AuthenticatedUser,
//! ) -> Result<HttpResponse, AppError> {
//!     let revoked = token_service.logout(&user.username).await?;
//!     Ok(HttpResponse::Ok().json(ApiResponse::success(LogoutResponse { revoked })))
//! }
//! ```

pub mod token_handlers;
