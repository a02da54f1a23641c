//! Job polling shared by the engine and DCT clients
//!
//! Long-running engine work is tracked by re-fetching a job resource
//! until it leaves its running state. The loop is deliberately simple:
//! fixed interval, no backoff, no iteration bound. A fetch failure is
//! indistinguishable from "still running" beyond whatever the fetch
//! closure logs, so the loop keeps the last observation and tries again.

use std::time::Duration;

use tokio::sync::watch;

/// Fixed-interval polling configuration.
pub struct PollPolicy {
    /// Delay between status fetches
    pub interval: Duration,
}

/// What the poll loop ended with.
#[derive(Debug)]
pub struct PollOutcome<T> {
    /// Last observed status; `None` when nothing was ever fetched
    /// successfully before the loop was interrupted.
    pub status: Option<T>,
    /// The wait was cancelled before a terminal status was seen.
    pub interrupted: bool,
}

impl PollPolicy {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Cadence used against the legacy engine job resource.
    pub fn engine() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Cadence used against the DCT jobs endpoint.
    pub fn dct() -> Self {
        Self::new(Duration::from_secs(20))
    }

    /// Polls `fetch` until `is_terminal` holds for an observation or the
    /// cancel channel fires mid-wait.
    ///
    /// `fetch` maps its own failures to `None` (logging them as it sees
    /// fit); a `None` keeps the previous observation and keeps polling.
    /// `observe` runs on every successful fetch. A terminal first
    /// observation returns immediately without sleeping. Cancellation
    /// abandons the wait and hands back the last known status, which may
    /// still be non-terminal; that is a best-effort exit, not a
    /// guaranteed terminal result.
    pub async fn poll_until<T, F, Fut>(
        &self,
        cancel: &mut watch::Receiver<bool>,
        mut fetch: F,
        is_terminal: impl Fn(&T) -> bool,
        mut observe: impl FnMut(&T),
    ) -> PollOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Option<T>>,
    {
        let mut last: Option<T> = None;

        loop {
            if let Some(status) = fetch().await {
                observe(&status);
                let terminal = is_terminal(&status);
                last = Some(status);
                if terminal {
                    return PollOutcome {
                        status: last,
                        interrupted: false,
                    };
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                changed = cancel.changed() => {
                    // A closed channel means the build is gone; treat it
                    // the same as an explicit cancel.
                    let cancelled = changed.is_err() || *cancel.borrow();
                    if cancelled {
                        return PollOutcome {
                            status: last,
                            interrupted: true,
                        };
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn cancel_pair() -> (watch::Sender<bool>, watch::Receiver<bool>) {
        watch::channel(false)
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum State {
        Running,
        Completed,
    }

    fn terminal(state: &State) -> bool {
        *state != State::Running
    }

    #[tokio::test]
    async fn test_terminal_first_observation_returns_immediately() {
        let policy = PollPolicy::new(Duration::from_secs(60));
        let (_tx, mut rx) = cancel_pair();

        let outcome = tokio::time::timeout(
            Duration::from_millis(100),
            policy.poll_until(&mut rx, || async { Some(State::Completed) }, terminal, |_| {}),
        )
        .await
        .expect("must not sleep when the first status is terminal");

        assert_eq!(outcome.status, Some(State::Completed));
        assert!(!outcome.interrupted);
    }

    #[tokio::test]
    async fn test_polls_until_terminal() {
        let policy = PollPolicy::new(Duration::from_millis(5));
        let (_tx, mut rx) = cancel_pair();
        let fetches = Cell::new(0);
        let observed = Cell::new(0);

        let counter = &fetches;
        let outcome = policy
            .poll_until(
                &mut rx,
                move || async move {
                    let count = counter.get() + 1;
                    counter.set(count);
                    if count < 3 {
                        Some(State::Running)
                    } else {
                        Some(State::Completed)
                    }
                },
                terminal,
                |_| observed.set(observed.get() + 1),
            )
            .await;

        assert_eq!(outcome.status, Some(State::Completed));
        assert!(!outcome.interrupted);
        assert_eq!(fetches.get(), 3);
        assert_eq!(observed.get(), 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_polling() {
        let policy = PollPolicy::new(Duration::from_millis(5));
        let (_tx, mut rx) = cancel_pair();
        let fetches = Cell::new(0);

        let counter = &fetches;
        let outcome = policy
            .poll_until(
                &mut rx,
                move || async move {
                    let count = counter.get() + 1;
                    counter.set(count);
                    // Unreachable remote on the first two attempts.
                    if count < 3 {
                        None
                    } else {
                        Some(State::Completed)
                    }
                },
                terminal,
                |_| {},
            )
            .await;

        assert_eq!(outcome.status, Some(State::Completed));
        assert!(!outcome.interrupted);
    }

    #[tokio::test]
    async fn test_cancel_mid_wait_returns_last_non_terminal() {
        let policy = PollPolicy::new(Duration::from_secs(60));
        let (tx, mut rx) = cancel_pair();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(true);
        });

        let outcome = policy
            .poll_until(&mut rx, || async { Some(State::Running) }, terminal, |_| {})
            .await;

        assert_eq!(outcome.status, Some(State::Running));
        assert!(outcome.interrupted);
    }

    #[tokio::test]
    async fn test_cancel_before_any_observation_returns_none() {
        let policy = PollPolicy::new(Duration::from_secs(60));
        let (tx, mut rx) = cancel_pair();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(true);
        });

        let outcome = policy
            .poll_until(&mut rx, || async { None::<State> }, terminal, |_| {})
            .await;

        assert!(outcome.status.is_none());
        assert!(outcome.interrupted);
    }

    #[tokio::test]
    async fn test_dropped_cancel_sender_interrupts() {
        let policy = PollPolicy::new(Duration::from_secs(60));
        let (tx, mut rx) = cancel_pair();
        drop(tx);

        let outcome = policy
            .poll_until(&mut rx, || async { Some(State::Running) }, terminal, |_| {})
            .await;

        assert_eq!(outcome.status, Some(State::Running));
        assert!(outcome.interrupted);
    }
}
