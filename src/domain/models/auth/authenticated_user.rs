use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;
use crate::domain::models::token::TokenClaims;
use crate::errors::UNAUTHENTICATED_MESSAGE;

/// 인증 미들웨어가 검증을 마친 요청의 사용자 정보
///
/// 미들웨어가 요청 extensions에 넣어 두면 핸들러가 추출자로 꺼내 씁니다.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    /// 토큰 주체 (사용자명)
    pub username: String,

    /// 검증된 토큰 클레임
    pub claims: TokenClaims,

    /// 요청에 실린 원본 액세스 토큰
    #[serde(skip_serializing)]
    pub token: String,
}

impl AuthenticatedUser {
    pub fn new(claims: TokenClaims, token: impl Into<String>) -> Self {
        Self {
            username: claims.sub.clone(),
            claims,
            token: token.into(),
        }
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(UNAUTHENTICATED_MESSAGE))),
        }
    }
}
