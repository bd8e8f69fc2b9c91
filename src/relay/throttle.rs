//! 上游调用节流
//!
//! 保证两次上游调用之间至少间隔固定时长。不是令牌桶，也不做滑动窗口。

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// 最小间隔节流器
///
/// 读取上次调用时间、等待、记录新时间这三步在同一把锁内完成，
/// 并发请求会排队，相邻两次调用的间隔不会小于 `interval`
pub struct Throttle {
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: Mutex::new(None),
        }
    }

    /// 必要时等待，然后把当前时间记为最近一次调用
    ///
    /// 无论随后的上游调用是否成功都会记录。返回实际等待的时长。
    pub async fn wait_then_mark(&self) -> Duration {
        let mut last_call = self.last_call.lock().await;

        let mut waited = Duration::ZERO;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                waited = self.interval - elapsed;
                tokio::time::sleep(waited).await;
            }
        }

        *last_call = Some(Instant::now());
        waited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const INTERVAL: Duration = Duration::from_secs(2);

    #[tokio::test(start_paused = true)]
    async fn first_call_does_not_wait() {
        let throttle = Throttle::new(INTERVAL);
        assert_eq!(throttle.wait_then_mark().await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn second_call_waits_for_remaining_interval() {
        let throttle = Throttle::new(INTERVAL);
        let start = Instant::now();

        throttle.wait_then_mark().await;
        tokio::time::advance(Duration::from_millis(500)).await;
        let waited = throttle.wait_then_mark().await;

        assert_eq!(waited, Duration::from_millis(1500));
        assert!(start.elapsed() >= INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_once_interval_has_passed() {
        let throttle = Throttle::new(INTERVAL);

        throttle.wait_then_mark().await;
        tokio::time::advance(Duration::from_secs(3)).await;

        assert_eq!(throttle.wait_then_mark().await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_are_spaced() {
        let throttle = Arc::new(Throttle::new(INTERVAL));
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let throttle = throttle.clone();
                tokio::spawn(async move {
                    throttle.wait_then_mark().await;
                    Instant::now()
                })
            })
            .collect();

        let mut marks = Vec::new();
        for handle in handles {
            marks.push(handle.await.unwrap());
        }
        marks.sort();

        for pair in marks.windows(2) {
            assert!(pair[1] - pair[0] >= INTERVAL);
        }
        assert!(start.elapsed() >= INTERVAL * 2);
    }

    #[tokio::test]
    async fn zero_interval_never_waits() {
        let throttle = Throttle::new(Duration::ZERO);
        throttle.wait_then_mark().await;
        assert_eq!(throttle.wait_then_mark().await, Duration::ZERO);
    }
}
