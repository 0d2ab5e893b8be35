//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Bearer 토큰을 검증하고 사용자 정보를 추출합니다.
//! 검증은 `web::Data<TokenService>`로 등록된 서비스가 수행하므로, 이 미들웨어를
//! 감싼 `App`에는 반드시 `TokenService`가 `app_data`로 등록되어 있어야 합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
///
/// 검증에 실패한 요청은 핸들러에 도달하지 않고 401로 응답합니다.
/// 거부 사유(무효/만료/폐기/대체)와 관계없이 응답 본문은 같습니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
