//! Restart policy for the long-poll listener

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::error::TelegramResult;

/// Process-wide "a listener is running" flag
pub static LISTENER_RUNNING: AtomicBool = AtomicBool::new(false);

/// Exclusive claim on a running flag, released on drop
#[derive(Debug)]
pub struct ListenerGuard {
    flag: &'static AtomicBool,
}

impl ListenerGuard {
    /// `None` if another listener already holds the flag
    pub fn acquire(flag: &'static AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Exponential restart delay: base, doubled per consecutive failure, capped
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    cap: Duration,
    failures: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(30), Duration::from_secs(300))
    }
}

impl Backoff {
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self {
            base,
            cap,
            failures: 0,
        }
    }

    /// Delay before the next restart
    pub fn next_delay(&mut self) -> Duration {
        let factor = 1u32.checked_shl(self.failures).unwrap_or(u32::MAX);
        self.failures = self.failures.saturating_add(1);
        self.base.saturating_mul(factor).min(self.cap)
    }

    pub fn reset(&mut self) {
        self.failures = 0;
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}

/// Runs a listener factory until shutdown, restarting it after failures
#[derive(Debug)]
pub struct Supervisor {
    backoff: Backoff,
    /// A run at least this long resets the backoff
    stable_after: Duration,
    flag: &'static AtomicBool,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new(Backoff::default())
    }
}

impl Supervisor {
    pub fn new(backoff: Backoff) -> Self {
        Self {
            backoff,
            stable_after: Duration::from_secs(300),
            flag: &LISTENER_RUNNING,
        }
    }

    #[must_use]
    pub fn with_stable_after(mut self, stable_after: Duration) -> Self {
        self.stable_after = stable_after;
        self
    }

    #[must_use]
    pub fn with_flag(mut self, flag: &'static AtomicBool) -> Self {
        self.flag = flag;
        self
    }

    /// Run `start` repeatedly until `shutdown` flips
    ///
    /// Returns `false` without running anything if another listener already
    /// holds the flag.
    pub async fn run<F, Fut>(&mut self, mut shutdown: watch::Receiver<bool>, mut start: F) -> bool
    where
        F: FnMut(watch::Receiver<bool>) -> Fut,
        Fut: Future<Output = TelegramResult<()>>,
    {
        let Some(_guard) = ListenerGuard::acquire(self.flag) else {
            warn!("Telegram listener already running; not starting another");
            return false;
        };

        loop {
            if *shutdown.borrow() {
                break;
            }

            let started = Instant::now();
            let outcome = start(shutdown.clone()).await;
            let ran_for = started.elapsed();

            if *shutdown.borrow() {
                break;
            }

            if ran_for >= self.stable_after {
                self.backoff.reset();
            }

            match outcome {
                Ok(()) => info!("Telegram listener exited; restarting"),
                Err(e) => error!(error = %e, "Telegram listener failed"),
            }

            let delay = self.backoff.next_delay();
            warn!(
                delay_secs = delay.as_secs(),
                failures = self.backoff.failures(),
                "Restarting Telegram listener after delay"
            );

            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => break,
            }
        }

        info!("Telegram supervisor stopped");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TelegramError;
    use std::sync::atomic::AtomicU32;
    use std::sync::Arc;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let mut backoff = Backoff::default();
        let delays: Vec<u64> = (0..6).map(|_| backoff.next_delay().as_secs()).collect();
        assert_eq!(delays, vec![30, 60, 120, 240, 300, 300]);

        backoff.reset();
        assert_eq!(backoff.next_delay(), Duration::from_secs(30));
    }

    #[test]
    fn test_backoff_survives_many_failures() {
        let mut backoff = Backoff::default();
        for _ in 0..100 {
            assert!(backoff.next_delay() <= Duration::from_secs(300));
        }
    }

    #[test]
    fn test_guard_is_exclusive() {
        static FLAG: AtomicBool = AtomicBool::new(false);

        let first = ListenerGuard::acquire(&FLAG);
        assert!(first.is_some());
        assert!(ListenerGuard::acquire(&FLAG).is_none());

        drop(first);
        assert!(ListenerGuard::acquire(&FLAG).is_some());
    }

    #[tokio::test]
    async fn test_second_supervisor_refused() {
        static FLAG: AtomicBool = AtomicBool::new(false);
        let _held = ListenerGuard::acquire(&FLAG).unwrap();

        let (_tx, rx) = watch::channel(false);
        let mut supervisor = Supervisor::default().with_flag(&FLAG);
        let started = supervisor.run(rx, |_| async { Ok(()) }).await;
        assert!(!started);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restarts_after_failure_until_shutdown() {
        static FLAG: AtomicBool = AtomicBool::new(false);

        let runs = Arc::new(AtomicU32::new(0));
        let (tx, rx) = watch::channel(false);

        let counter = runs.clone();
        let handle = tokio::spawn(async move {
            let mut supervisor = Supervisor::default().with_flag(&FLAG);
            supervisor
                .run(rx, move |_| {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Err(TelegramError::MissingToken)
                    }
                })
                .await
        });

        // 30s then 60s delays: three runs by t=91s
        tokio::time::sleep(Duration::from_secs(91)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 3);

        tx.send(true).unwrap();
        assert!(handle.await.unwrap());
        assert!(!FLAG.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stable_run_resets_backoff() {
        static FLAG: AtomicBool = AtomicBool::new(false);

        let (_tx, rx) = watch::channel(false);
        let mut supervisor = Supervisor::default()
            .with_flag(&FLAG)
            .with_stable_after(Duration::from_secs(10));
        supervisor.backoff.next_delay();
        supervisor.backoff.next_delay();

        let runs = Arc::new(AtomicU32::new(0));
        let counter = runs.clone();
        let run = supervisor.run(rx, move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(20)).await;
                Ok(())
            }
        });

        let _ = tokio::time::timeout(Duration::from_secs(25), run).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(supervisor.backoff.failures(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_before_start_runs_nothing() {
        static FLAG: AtomicBool = AtomicBool::new(false);

        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let runs = Arc::new(AtomicU32::new(0));
        let counter = runs.clone();
        let mut supervisor = Supervisor::default().with_flag(&FLAG);
        let started = supervisor
            .run(rx, move |_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .await;

        assert!(started);
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
