//! 실행 환경 및 서버 설정 관리 모듈
//!
//! 실행 환경(개발/테스트/스테이징/프로덕션) 감지와 HTTP 서버 바인딩 설정을 관리합니다.

use super::lookup::{self, Lookup};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_lookup(&lookup::process_env)
    }

    /// 조회 함수에서 `ENVIRONMENT` 값을 읽어 실행 환경을 결정합니다.
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self::from_str(&lookup::string_or(lookup, "ENVIRONMENT", "production"))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 감사 로그에서 사용자명을 가리는 것이 기본인 환경인지 여부
    ///
    /// 프로덕션과 스테이징에서는 실제 사용자명을 로그에 남기지 않습니다.
    pub fn masks_usernames_by_default(&self) -> bool {
        matches!(self, Environment::Production | Environment::Staging)
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// 환경 변수에서 서버 설정을 읽습니다.
    ///
    /// - `HOST`: 기본값 "0.0.0.0" (모든 인터페이스)
    /// - `PORT`: 기본값 8080
    pub fn from_env() -> Self {
        Self::from_lookup(&lookup::process_env)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            host: lookup::string_or(lookup, "HOST", "0.0.0.0"),
            port: lookup::parse_or(lookup, "PORT", 8080u16),
        }
    }

    /// `host:port` 형식의 바인딩 주소
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
