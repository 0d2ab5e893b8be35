//! 토큰 저장소 추상화
//!
//! 레지스트리는 저장소 구현을 알지 못하고 [`TokenStore`]만 사용합니다.
//! 백그라운드 정리가 필요한 저장소는 [`Sweepable`]을 추가로 구현하고
//! [`TokenStore::as_sweepable`]로 그 사실을 알립니다.

use async_trait::async_trait;
use crate::domain::models::token::TokenRecord;
use crate::errors::AppResult;

/// 저장소가 허용하는 최소 TTL (초)
pub const MIN_TTL_SECONDS: u64 = 1;

/// 계산된 TTL을 저장소에 넘길 값으로 변환합니다.
///
/// 0 이하의 값(이미 만료된 토큰 등)은 [`MIN_TTL_SECONDS`]로 올립니다.
pub fn clamp_ttl(ttl_seconds: i64) -> u64 {
    u64::try_from(ttl_seconds).unwrap_or(0).max(MIN_TTL_SECONDS)
}

/// 토큰 레코드와 폐기 마커를 보관하는 저장소
///
/// 모든 연산은 개별적으로 원자적이어야 합니다.
/// 여러 연산을 묶은 동작(사용자 폐기 등)은 레지스트리가 순서를 보장합니다.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// 사용자의 활성 레코드를 저장(덮어쓰기)합니다.
    async fn save(&self, username: &str, record: &TokenRecord, ttl_seconds: i64) -> AppResult<()>;

    /// 사용자의 활성 레코드. 없거나 만료되었으면 `None`
    async fn read(&self, username: &str) -> AppResult<Option<TokenRecord>>;

    /// 사용자의 활성 레코드를 삭제합니다. 없으면 아무 일도 하지 않습니다.
    async fn delete(&self, username: &str) -> AppResult<()>;

    /// 토큰 해시에 폐기 마커를 남깁니다.
    async fn mark_revoked(&self, token_hash: &str, ttl_seconds: i64) -> AppResult<()>;

    /// 토큰 해시에 유효한 폐기 마커가 있는지 확인합니다.
    async fn is_revoked(&self, token_hash: &str) -> AppResult<bool>;

    /// 로그용 저장소 이름
    fn backend_name(&self) -> &'static str;

    /// 백그라운드 정리 기능이 있으면 반환합니다.
    fn as_sweepable(&self) -> Option<&dyn Sweepable> {
        None
    }
}

/// 만료 항목을 주기적으로 정리하는 백그라운드 작업을 가진 저장소
#[async_trait]
pub trait Sweepable: Send + Sync {
    /// 정리 작업을 시작합니다. 이미 실행 중이면 아무 일도 하지 않습니다.
    async fn start_sweep(&self);

    /// 정리 작업에 중지를 알리고 종료될 때까지 기다립니다.
    /// 실행 중이 아니면 아무 일도 하지 않습니다.
    async fn stop_sweep(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_ttl_floors_non_positive_values() {
        assert_eq!(clamp_ttl(-30), 1);
        assert_eq!(clamp_ttl(0), 1);
        assert_eq!(clamp_ttl(1), 1);
        assert_eq!(clamp_ttl(900), 900);
    }
}
