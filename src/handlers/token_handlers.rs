//! 토큰 발급/갱신/로그아웃/조회 핸들러
//!
//! 모든 핸들러는 `web::Data<TokenService>`를 주입받습니다.
//! 토큰 검증 실패는 `AppError::AuthenticationError`로 변환되어 같은 401 응답이 됩니다.

use actix_web::{web, HttpResponse, get, post};
use validator::Validate;
use crate::domain::{
    ApiResponse, AuthenticatedUser, IssueTokenRequest, LogoutResponse, MeResponse, RefreshRequest,
    RevokeTokenRequest, RevokeTokenResponse,
};
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::TokenService;

/// 토큰 발급 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/token`
#[post("/token")]
pub async fn issue_token(
    token_service: web::Data<TokenService>,
    payload: web::Json<IssueTokenRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let pair = token_service.issue_token_pair(&payload.username).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(pair)))
}

/// 토큰 갱신 핸들러
///
/// 리프레시 토큰 자체가 자격 증명이므로 Authorization 헤더를 요구하지 않습니다.
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh_token(
    token_service: web::Data<TokenService>,
    payload: web::Json<RefreshRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let pair = token_service.refresh(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(pair)))
}

/// 로그아웃 핸들러
///
/// 요청한 사용자의 현재 토큰 쌍을 모두 폐기합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/logout` (Bearer)
#[post("/logout", wrap = "AuthMiddleware::required()")]
pub async fn logout(
    token_service: web::Data<TokenService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let revoked = token_service.logout(&user.username).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        LogoutResponse { revoked },
        "로그아웃이 성공적으로 처리되었습니다",
    )))
}

/// 개별 토큰 폐기 핸들러
///
/// 본문의 토큰을 만료 시각까지 폐기합니다. 세션 전체를 끊지 않으므로
/// 리프레시 토큰만 폐기하면 현재 액세스 토큰은 만료될 때까지 유효합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/revoke` (Bearer)
#[post("/revoke", wrap = "AuthMiddleware::required()")]
pub async fn revoke(
    token_service: web::Data<TokenService>,
    _user: AuthenticatedUser,
    payload: web::Json<RevokeTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    token_service.revoke_token(&payload.token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(RevokeTokenResponse { revoked: true })))
}

/// 현재 사용자 조회 핸들러
///
/// # Endpoint
/// `GET /api/v1/auth/me` (Bearer)
#[get("/me", wrap = "AuthMiddleware::required()")]
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(MeResponse {
        username: user.username,
        expires_at: user.claims.exp,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::{http::StatusCode, test, App};
    use chrono::{Duration, Utc};
    use jsonwebtoken::Algorithm;
    use serde_json::{json, Value};
    use crate::config::JwtSettings;
    use crate::repositories::tokens::InMemoryTokenStore;
    use crate::routes::configure_all_routes;
    use crate::services::auth::{TokenAuditLogger, TokenRegistry};
    use crate::utils::clock::ManualClock;
    use super::*;

    fn token_service() -> web::Data<TokenService> {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = Arc::new(InMemoryTokenStore::new(std::time::Duration::from_secs(60)));
        let registry = Arc::new(TokenRegistry::with_store(store, clock.clone(), 3600));
        let jwt = JwtSettings {
            secret: "handler-secret".to_string(),
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::days(7),
        };
        web::Data::new(TokenService::new(registry, TokenAuditLogger::new(true, true), jwt, clock).unwrap())
    }

    macro_rules! app {
        ($service:expr) => {
            test::init_service(App::new().app_data($service.clone()).configure(configure_all_routes)).await
        };
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_issue_then_me() {
        let service = token_service();
        let app = app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/token")
            .set_json(json!({ "username": "alice" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["token_type"], "Bearer");
        let access = body["data"]["access_token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer(&access))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["username"], "alice");
    }

    #[actix_web::test]
    async fn test_issue_rejects_empty_username() {
        let service = token_service();
        let app = app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/token")
            .set_json(json!({ "username": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_logout_then_token_is_rejected() {
        let service = token_service();
        let pair = service.issue_token_pair("alice").await.unwrap();
        let app = app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header(bearer(&pair.access_token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["revoked"], true);

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer(&pair.access_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .set_json(json!({ "refresh_token": pair.refresh_token }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_refresh_rotates_pair() {
        let service = token_service();
        let first = service.issue_token_pair("carol").await.unwrap();
        let app = app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .set_json(json!({ "refresh_token": first.refresh_token }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let second_access = body["data"]["access_token"].as_str().unwrap().to_string();
        assert_ne!(second_access, first.access_token);

        // 이전 액세스 토큰과 무효 토큰은 같은 401 본문
        let superseded = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer(&first.access_token))
            .to_request();
        let superseded = test::call_service(&app, superseded).await;
        assert_eq!(superseded.status(), StatusCode::UNAUTHORIZED);
        let superseded_body = test::read_body(superseded).await;

        let refresh_with_access = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .set_json(json!({ "refresh_token": second_access }))
            .to_request();
        let refresh_with_access = test::call_service(&app, refresh_with_access).await;
        assert_eq!(refresh_with_access.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(test::read_body(refresh_with_access).await, superseded_body);
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_a_bearer_credential() {
        let service = token_service();
        let pair = service.issue_token_pair("alice").await.unwrap();
        let app = app!(service);

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer(&pair.refresh_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header(bearer(&pair.refresh_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // 세션은 그대로 남아 있어야 함
        assert!(service.verify_token(&pair.access_token).await.is_ok());
    }

    #[actix_web::test]
    async fn test_revoke_single_token() {
        let service = token_service();
        let pair = service.issue_token_pair("dave").await.unwrap();
        let app = app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/revoke")
            .insert_header(bearer(&pair.access_token))
            .set_json(json!({ "token": pair.refresh_token }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["revoked"], true);

        // 폐기된 리프레시 토큰으로는 갱신 불가
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .set_json(json!({ "refresh_token": pair.refresh_token }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // 액세스 토큰은 계속 유효
        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer(&pair.access_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_revoke_requires_bearer() {
        let service = token_service();
        let pair = service.issue_token_pair("erin").await.unwrap();
        let app = app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/revoke")
            .set_json(json!({ "token": pair.access_token }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(service.verify_token(&pair.access_token).await.is_ok());
    }

    #[actix_web::test]
    async fn test_health_reports_backend() {
        let service = token_service();
        let app = app!(service);

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["token_backend"], "memory");
    }
}
