//! 프로세스 내부 메모리 토큰 저장소
//!
//! Redis를 사용할 수 없을 때의 대체 저장소입니다.
//!
//! - 만료 시각을 직접 관리하며, 조회 시 만료된 항목을 즉시 제거(lazy eviction)
//! - 한 번도 조회되지 않는 항목은 백그라운드 정리 작업(sweep)이 주기적으로 제거
//! - 재시작 시 모든 상태가 사라지고 다른 프로세스와 공유되지 않음
//!
//! 만료 시각은 `tokio::time::Instant`로 기록되므로 `start_paused` 테스트에서
//! 실제로 기다리지 않고 시간을 진행시킬 수 있습니다.
//!
//! ## 메트릭
//!
//! | 이름 | 종류 | 의미 |
//! |------|------|------|
//! | `token_registry_memory_active_records` | gauge | 보관 중인 활성 레코드 수 |
//! | `token_registry_memory_revoked_tokens` | gauge | 보관 중인 폐기 마커 수 |
//! | `token_registry_memory_sweeps_total` | counter | 실행된 정리 횟수 |

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use crate::domain::models::token::TokenRecord;
use crate::errors::AppResult;
use super::token_store::{clamp_ttl, Sweepable, TokenStore};

const ACTIVE_RECORDS_GAUGE: &str = "token_registry_memory_active_records";
const REVOKED_TOKENS_GAUGE: &str = "token_registry_memory_revoked_tokens";
const SWEEPS_COUNTER: &str = "token_registry_memory_sweeps_total";

/// 메모리 저장소 현황
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryStoreStats {
    /// 보관 중인 활성 레코드 수 (아직 제거되지 않은 만료 항목 포함)
    pub active_records: usize,
    /// 보관 중인 폐기 마커 수 (아직 제거되지 않은 만료 항목 포함)
    pub revoked_tokens: usize,
    /// 지금까지 실행된 정리 횟수
    pub sweeps: u64,
}

#[derive(Default)]
struct MemoryState {
    records: HashMap<String, (TokenRecord, Instant)>,
    revoked: HashMap<String, Instant>,
}

impl MemoryState {
    fn publish(&self) {
        metrics::gauge!(ACTIVE_RECORDS_GAUGE).set(self.records.len() as f64);
        metrics::gauge!(REVOKED_TOKENS_GAUGE).set(self.revoked.len() as f64);
    }

    /// 만료된 항목을 모두 제거하고 제거한 개수를 반환합니다.
    fn evict_expired(&mut self, now: Instant) -> usize {
        let before = self.records.len() + self.revoked.len();
        self.records.retain(|_, (_, expires_at)| *expires_at > now);
        self.revoked.retain(|_, expires_at| *expires_at > now);
        before - (self.records.len() + self.revoked.len())
    }
}

struct Inner {
    state: Mutex<MemoryState>,
    sweeps: AtomicU64,
}

impl Inner {
    async fn sweep(&self) {
        let mut state = self.state.lock().await;
        let evicted = state.evict_expired(Instant::now());
        state.publish();
        drop(state);

        self.sweeps.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(SWEEPS_COUNTER).increment(1);

        if evicted > 0 {
            log::debug!("메모리 토큰 저장소 정리 - 만료 항목 {}개 제거", evicted);
        }
    }
}

struct SweepHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// 메모리 토큰 저장소
pub struct InMemoryTokenStore {
    inner: Arc<Inner>,
    sweep_interval: Duration,
    sweeper: Mutex<Option<SweepHandle>>,
}

impl InMemoryTokenStore {
    /// `sweep_interval`마다 만료 항목을 정리하는 저장소를 만듭니다.
    /// 정리 작업은 [`Sweepable::start_sweep`]을 호출해야 시작됩니다.
    pub fn new(sweep_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(MemoryState::default()),
                sweeps: AtomicU64::new(0),
            }),
            sweep_interval: sweep_interval.max(Duration::from_secs(1)),
            sweeper: Mutex::new(None),
        }
    }

    /// 현재 보관 중인 항목 수. 만료 항목을 제거하지 않습니다.
    pub async fn stats(&self) -> MemoryStoreStats {
        let state = self.inner.state.lock().await;
        MemoryStoreStats {
            active_records: state.records.len(),
            revoked_tokens: state.revoked.len(),
            sweeps: self.inner.sweeps.load(Ordering::Relaxed),
        }
    }

    /// 정리 작업 실행 여부
    pub async fn is_sweeping(&self) -> bool {
        self.sweeper.lock().await.is_some()
    }

    fn expires_at(ttl_seconds: i64) -> Instant {
        Instant::now() + Duration::from_secs(clamp_ttl(ttl_seconds))
    }
}

impl std::fmt::Debug for InMemoryTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTokenStore")
            .field("sweep_interval", &self.sweep_interval)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn save(&self, username: &str, record: &TokenRecord, ttl_seconds: i64) -> AppResult<()> {
        let now = Instant::now();
        let expires_at = Self::expires_at(ttl_seconds);

        let mut state = self.inner.state.lock().await;
        if matches!(state.records.get(username), Some((_, old)) if *old <= now) {
            state.records.remove(username);
        }
        state.records.insert(username.to_string(), (record.clone(), expires_at));
        state.publish();
        Ok(())
    }

    async fn read(&self, username: &str) -> AppResult<Option<TokenRecord>> {
        let mut state = self.inner.state.lock().await;

        match state.records.get(username) {
            Some((record, expires_at)) if *expires_at > Instant::now() => Ok(Some(record.clone())),
            Some(_) => {
                state.records.remove(username);
                state.publish();
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, username: &str) -> AppResult<()> {
        let mut state = self.inner.state.lock().await;
        if state.records.remove(username).is_some() {
            state.publish();
        }
        Ok(())
    }

    async fn mark_revoked(&self, token_hash: &str, ttl_seconds: i64) -> AppResult<()> {
        let now = Instant::now();
        let expires_at = Self::expires_at(ttl_seconds);

        let mut state = self.inner.state.lock().await;
        if matches!(state.revoked.get(token_hash), Some(old) if *old <= now) {
            state.revoked.remove(token_hash);
        }
        state.revoked.insert(token_hash.to_string(), expires_at);
        state.publish();
        Ok(())
    }

    async fn is_revoked(&self, token_hash: &str) -> AppResult<bool> {
        let mut state = self.inner.state.lock().await;

        match state.revoked.get(token_hash) {
            Some(expires_at) if *expires_at > Instant::now() => Ok(true),
            Some(_) => {
                state.revoked.remove(token_hash);
                state.publish();
                Ok(false)
            }
            None => Ok(false),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn as_sweepable(&self) -> Option<&dyn Sweepable> {
        Some(self)
    }
}

#[async_trait]
impl Sweepable for InMemoryTokenStore {
    async fn start_sweep(&self) {
        let mut sweeper = self.sweeper.lock().await;
        if sweeper.is_some() {
            return;
        }

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let inner = Arc::clone(&self.inner);
        let interval = self.sweep_interval;

        // stop_tx가 drop되어도 stop_rx가 깨어나므로 저장소가 사라지면 작업도 끝남
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = tokio::time::sleep(interval) => inner.sweep().await,
                }
            }
            log::debug!("메모리 토큰 저장소 정리 작업 종료");
        });

        *sweeper = Some(SweepHandle { stop: stop_tx, task });
        log::info!("메모리 토큰 저장소 정리 작업 시작 (주기: {}초)", interval.as_secs());
    }

    async fn stop_sweep(&self) {
        let Some(handle) = self.sweeper.lock().await.take() else {
            return;
        };

        // 작업이 이미 끝났으면 수신자가 없어 실패하지만 무시해도 됨
        let _ = handle.stop.send(());
        if let Err(e) = handle.task.await {
            log::error!("메모리 토큰 저장소 정리 작업 비정상 종료: {}", e);
        }
    }
}
