//! Elapsed-time ticker.
//!
//! A spawned task sends one [`SessionEvent::Tick`] per interval. It never
//! touches session state itself; the controller counts ticks when it
//! processes them.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use uuid::Uuid;

use crate::controller::{EventSender, SessionEvent};

/// Cancellable periodic tick task for one session.
#[derive(Debug)]
pub struct ElapsedTimer {
    session: Uuid,
    handle: Option<JoinHandle<()>>,
}

impl ElapsedTimer {
    /// Start ticking. The first tick arrives one `period` from now.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(session: Uuid, period: Duration, events: EventSender) -> Self {
        let first = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(first, period);
            loop {
                ticker.tick().await;
                if events.send(SessionEvent::Tick { session }).is_err() {
                    break;
                }
            }
        });
        Self {
            session,
            handle: Some(handle),
        }
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the tick task. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(session = %self.session, "elapsed timer cancelled");
        }
    }
}

impl Drop for ElapsedTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        let _timer = ElapsedTimer::start(id, Duration::from_secs(1), tx);

        tokio::time::sleep(Duration::from_millis(3500)).await;

        let mut ticks = 0;
        while let Ok(event) = rx.try_recv() {
            assert_eq!(event, SessionEvent::Tick { session: id });
            ticks += 1;
        }
        assert_eq!(ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn no_ticks_after_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = ElapsedTimer::start(Uuid::new_v4(), Duration::from_secs(1), tx);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        timer.cancel();
        assert!(!timer.is_running());
        while rx.try_recv().is_ok() {}

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_the_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        drop(ElapsedTimer::start(
            Uuid::new_v4(),
            Duration::from_secs(1),
            tx,
        ));

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err());
    }
}
