//! Cancelable delayed task.

use std::future;
use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Default quiescence before a burst of form events triggers a recompute.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A single pending deadline that each new event pushes back.
///
/// The debouncer does not run anything itself. The owner awaits
/// [`fired`](Self::fired) inside its event loop and does the work when it
/// resolves, so the work always runs on the owner's task with `&mut` access
/// to its state.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the deadline, superseding any pending one.
    pub fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Drop the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolves once the pending deadline passes, then disarms.
    /// Never resolves while nothing is scheduled.
    ///
    /// Cancel safe: dropping the future leaves the deadline armed.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    fn assert_elapsed(start: Instant, expected: Duration) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(5),
            "elapsed {elapsed:?}, expected {expected:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_quiescence() {
        let mut debounce = Debouncer::default();
        debounce.schedule();
        assert!(debounce.is_pending());

        let start = Instant::now();
        debounce.fired().await;
        assert_elapsed(start, DEFAULT_DEBOUNCE);
        assert!(!debounce.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_pushes_deadline_back() {
        let mut debounce = Debouncer::new(Duration::from_millis(300));
        let start = Instant::now();
        debounce.schedule();
        advance(Duration::from_millis(200)).await;
        debounce.schedule();

        debounce.fired().await;
        assert_elapsed(start, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_and_cancelled_never_fire() {
        let mut debounce = Debouncer::default();
        assert!(timeout(Duration::from_secs(5), debounce.fired()).await.is_err());

        debounce.schedule();
        assert!(debounce.cancel());
        assert!(!debounce.cancel());
        assert!(timeout(Duration::from_secs(5), debounce.fired()).await.is_err());
    }
}
