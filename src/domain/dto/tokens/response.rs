use serde::Serialize;

/// API 응답 래퍼
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

/// 로그아웃 결과
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// 활성 세션이 실제로 존재해서 제거되었는지 여부
    pub revoked: bool,
}

/// 개별 토큰 폐기 결과
#[derive(Debug, Serialize)]
pub struct RevokeTokenResponse {
    pub revoked: bool,
}

/// 현재 인증된 사용자 정보
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub username: String,
    /// 액세스 토큰 만료 시각 (Unix timestamp)
    pub expires_at: i64,
}
