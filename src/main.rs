use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use token_registry_service::config::{Environment, JwtSettings, RegistryConfig, ServerConfig};
use token_registry_service::errors::AppError;
use token_registry_service::routes::configure_all_routes;
use token_registry_service::services::auth::{TokenAuditLogger, TokenRegistry, TokenService};
use token_registry_service::utils::clock::{Clock, SystemClock};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    init_logging();
    load_env_file();

    let environment = Environment::current();
    info!("🚀 토큰 레지스트리 서비스 시작중... (environment: {:?})", environment);

    let server_config = ServerConfig::from_env();
    let registry_config = RegistryConfig::from_env().map_err(into_io_error)?;
    let jwt_settings = JwtSettings::from_env().map_err(into_io_error)?;

    if jwt_settings.uses_development_secret() && environment.masks_usernames_by_default() {
        warn!("운영 환경에서 개발용 JWT 비밀키를 사용하고 있습니다");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 저장소 선택 (Redis 연결 실패 시 메모리 저장소로 대체)
    let registry = Arc::new(TokenRegistry::from_config(&registry_config, clock.clone()).await);

    let audit = TokenAuditLogger::new(registry_config.audit_enabled, registry_config.mask_username);
    let token_service = web::Data::new(
        TokenService::new(registry.clone(), audit, jwt_settings, clock).map_err(into_io_error)?,
    );

    // 서비스 구성이 끝난 뒤에 백그라운드 작업 시작
    registry.startup().await;
    info!("✅ 토큰 레지스트리 준비 완료 (backend: {})", registry.backend_name());

    let result = start_http_server(&server_config, token_service).await;

    // 서버 종료 후 백그라운드 정리 작업 종료
    registry.shutdown().await;
    info!("토큰 레지스트리 종료");

    result
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
/// 서버가 종료 신호를 받아 멈출 때까지 반환하지 않습니다.
async fn start_http_server(
    server_config: &ServerConfig,
    token_service: web::Data<TokenService>,
) -> std::io::Result<()> {
    let bind_address = server_config.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(token_service.clone())
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// # 감사 로그만 끄기
/// RUST_LOG=info,token_audit=off cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// * `http://localhost:3000` - 프론트엔드 개발 서버
/// * `http://localhost:8080` - 자체 서버
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}

fn into_io_error(err: AppError) -> std::io::Error {
    error!("기동 실패: {}", err);
    std::io::Error::other(err.to_string())
}
