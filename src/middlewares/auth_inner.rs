//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::domain::{AuthenticatedUser, TokenType};
use crate::errors::{AppError, UNAUTHENTICATED_MESSAGE};
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let Some(token_service) = req.app_data::<web::Data<TokenService>>().cloned() else {
                log::error!("TokenService가 app_data에 등록되지 않았습니다");
                let response = AppError::InternalError("인증 서비스가 구성되지 않았습니다".to_string())
                    .error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            };

            match authenticate(&req, &token_service).await {
                Ok(user) => {
                    log::debug!("인증 성공: {}", user.username);
                    // 사용자 정보를 Request Extensions에 저장
                    req.extensions_mut().insert(user);
                }
                Err(err) => {
                    // 저장소 장애는 500, 그 외에는 사유와 무관하게 같은 401
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청에서 Bearer 토큰을 추출하고 검증
async fn authenticate(
    req: &ServiceRequest,
    token_service: &TokenService,
) -> Result<AuthenticatedUser, AppError> {
    let unauthenticated = || AppError::AuthenticationError(UNAUTHENTICATED_MESSAGE.to_string());

    let auth_header = req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            log::debug!("Authorization 헤더 없음: {}", req.path());
            unauthenticated()
        })?;

    let token = token_service
        .extract_bearer_token(auth_header)
        .map_err(|_| unauthenticated())?;

    let claims = token_service.verify_token(token).await?;

    // 리프레시 토큰은 /refresh 본문으로만 사용
    if claims.token_type != TokenType::Access {
        log::debug!("토큰 거부: Bearer 자격 증명으로 {} 토큰 사용", claims.token_type.as_str());
        return Err(unauthenticated());
    }

    Ok(AuthenticatedUser::new(claims, token))
}
