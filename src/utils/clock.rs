//! # 시계 추상화
//!
//! 토큰 만료 계산에 사용하는 현재 시각을 주입 가능하게 만듭니다.
//! 운영 환경에서는 [`SystemClock`]을, 테스트에서는 `ManualClock`을 사용하여
//! 실제로 기다리지 않고 시간을 앞당길 수 있습니다.
//!
//! ```rust,ignore
//! let clock = ManualClock::new(Utc::now());
//! let service = TokenService::new(registry, audit, jwt, Arc::new(clock.clone()))?;
//!
//! clock.advance(Duration::seconds(2));   // 2초 경과한 것처럼 동작
//! ```

use std::fmt::Debug;
use chrono::{DateTime, Utc};

#[cfg(test)]
pub use manual::ManualClock;

/// 현재 UTC 시각을 알려주는 시계
pub trait Clock: Send + Sync + Debug {
    /// 이 시계 기준의 현재 시각
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계 (`Utc::now()`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod manual {
    use std::sync::{Arc, Mutex, PoisonError};
    use chrono::{DateTime, Duration, Utc};
    use super::Clock;

    /// 수동으로 조작하는 테스트용 시계
    ///
    /// 복제본끼리 같은 시각을 공유하므로, 서비스에 하나를 넘기고
    /// 테스트 코드에서 다른 복제본으로 시간을 앞당기면 됩니다.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// 지정한 시각에서 시작하는 시계를 생성합니다.
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: Arc::new(Mutex::new(start)),
            }
        }

        /// 현재 시각을 `value`로 변경합니다.
        pub fn set(&self, value: DateTime<Utc>) {
            *self.now.lock().unwrap_or_else(PoisonError::into_inner) = value;
        }

        /// 현재 시각을 `by`만큼 앞당깁니다.
        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use super::*;

    #[test]
    fn test_manual_clock_advance_is_shared_between_clones() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        let handle = clock.clone();

        handle.advance(Duration::seconds(90));

        assert_eq!(clock.now(), start + Duration::seconds(90));
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::new(Utc::now());
        let target = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        clock.set(target);

        assert_eq!(clock.now(), target);
    }
}
