//! Background polling for unread notification and chat counts.
//!
//! The original product refetched these on fixed browser timers. Here the
//! contract is explicit: intervals come from config, each tick is jittered
//! to avoid aligning with other clients, transient failures retry with
//! backoff, and the handle owns shutdown: dropping it stops the task.

use backon::{ExponentialBuilder, Retryable};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::UnreadSource;

/// Events delivered to the UI. Counts are eventually consistent within one
/// polling interval; no delivery guarantees beyond that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreadEvent {
    Notifications(u32),
    Chats(u32),
    /// A poll failed after retries; the UI shows a degraded indicator.
    PollFailed(String),
}

/// Background service polling both unread counts.
pub struct UnreadPoller {
    source: Arc<dyn UnreadSource>,
    notifications_interval: Duration,
    chats_interval: Duration,
    event_tx: mpsc::UnboundedSender<UnreadEvent>,
}

/// Owns the running poll task. Dropping the handle (or calling
/// [`PollerHandle::shutdown`]) cancels the task. The component that
/// created the poller controls its teardown, never a framework hook.
pub struct PollerHandle {
    shutdown_tx: mpsc::Sender<()>,
    // Option so shutdown() can take the handle out from under Drop.
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl UnreadPoller {
    pub fn new(
        source: Arc<dyn UnreadSource>,
        notifications_interval: Duration,
        chats_interval: Duration,
        event_tx: mpsc::UnboundedSender<UnreadEvent>,
    ) -> Self {
        Self {
            source,
            notifications_interval,
            chats_interval,
            event_tx,
        }
    }

    /// Spawn the poll loop.
    pub fn spawn(self) -> PollerHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = tokio::spawn(async move {
            let mut notif_timer = tokio::time::interval(self.notifications_interval);
            let mut chat_timer = tokio::time::interval(self.chats_interval);
            let mut tick: u64 = 0;

            loop {
                tokio::select! {
                    _ = notif_timer.tick() => {
                        tick += 1;
                        tokio::time::sleep(jitter(self.notifications_interval, tick)).await;
                        self.poll_notifications().await;
                    }
                    _ = chat_timer.tick() => {
                        tick += 1;
                        tokio::time::sleep(jitter(self.chats_interval, tick)).await;
                        self.poll_chats().await;
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("unread poller shutting down");
                        break;
                    }
                }
            }
        });

        PollerHandle {
            shutdown_tx,
            task: Some(task),
        }
    }

    async fn poll_notifications(&self) {
        let source = self.source.clone();
        let result = (|| async { source.notification_unread_count().await })
            .retry(ExponentialBuilder::default().with_max_times(2))
            .when(|err| err.is_transient())
            .await;

        match result {
            Ok(count) => self.emit(UnreadEvent::Notifications(count)),
            Err(err) => {
                warn!(%err, "notification unread poll failed");
                self.emit(UnreadEvent::PollFailed(err.to_string()));
            }
        }
    }

    async fn poll_chats(&self) {
        let source = self.source.clone();
        let result = (|| async { source.chat_unread_count().await })
            .retry(ExponentialBuilder::default().with_max_times(2))
            .when(|err| err.is_transient())
            .await;

        match result {
            Ok(count) => self.emit(UnreadEvent::Chats(count)),
            Err(err) => {
                warn!(%err, "chat unread poll failed");
                self.emit(UnreadEvent::PollFailed(err.to_string()));
            }
        }
    }

    fn emit(&self, event: UnreadEvent) {
        // Receiver gone means the app is tearing down; nothing to do.
        let _ = self.event_tx.send(event);
    }
}

/// Deterministic per-tick jitter: 0..=20% of the interval, cycling so
/// successive ticks never land on the same offset.
fn jitter(interval: Duration, tick: u64) -> Duration {
    let step = (tick * 7) % 21; // 0..=20
    interval.mul_f64(step as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, UnreadSource};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FixedCounts {
        notifications: u32,
        chats: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl UnreadSource for FixedCounts {
        async fn notification_unread_count(&self) -> Result<u32, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.notifications)
        }

        async fn chat_unread_count(&self) -> Result<u32, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.chats)
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl UnreadSource for AlwaysFails {
        async fn notification_unread_count(&self) -> Result<u32, ApiError> {
            Err(ApiError::Unauthorized)
        }

        async fn chat_unread_count(&self) -> Result<u32, ApiError> {
            Err(ApiError::Unauthorized)
        }
    }

    #[test]
    fn jitter_stays_within_twenty_percent() {
        let interval = Duration::from_secs(10);
        for tick in 0..100 {
            let j = jitter(interval, tick);
            assert!(j <= interval.mul_f64(0.20), "tick {tick} -> {j:?}");
        }
    }

    #[test]
    fn jitter_varies_between_ticks() {
        let interval = Duration::from_secs(10);
        assert_ne!(jitter(interval, 1), jitter(interval, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn poller_emits_both_count_kinds() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let source = Arc::new(FixedCounts {
            notifications: 3,
            chats: 7,
            calls: AtomicU32::new(0),
        });
        let poller = UnreadPoller::new(
            source,
            Duration::from_secs(10),
            Duration::from_secs(5),
            tx,
        );
        let handle = poller.spawn();

        // First interval tick fires immediately; paused time auto-advances.
        let mut saw_notifications = false;
        let mut saw_chats = false;
        for _ in 0..4 {
            match rx.recv().await.unwrap() {
                UnreadEvent::Notifications(n) => {
                    assert_eq!(n, 3);
                    saw_notifications = true;
                }
                UnreadEvent::Chats(n) => {
                    assert_eq!(n, 7);
                    saw_chats = true;
                }
                UnreadEvent::PollFailed(err) => panic!("unexpected failure: {err}"),
            }
            if saw_notifications && saw_chats {
                break;
            }
        }
        assert!(saw_notifications && saw_chats);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn non_transient_failure_is_reported_without_retry_storm() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let poller = UnreadPoller::new(
            Arc::new(AlwaysFails),
            Duration::from_secs(10),
            Duration::from_secs(10),
            tx,
        );
        let handle = poller.spawn();

        match rx.recv().await.unwrap() {
            UnreadEvent::PollFailed(message) => {
                assert!(message.contains("unauthorized"));
            }
            other => panic!("expected failure event, got {other:?}"),
        }

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_joins_the_task_and_closes_the_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let poller = UnreadPoller::new(
            Arc::new(FixedCounts {
                notifications: 1,
                chats: 1,
                calls: AtomicU32::new(0),
            }),
            Duration::from_secs(1),
            Duration::from_secs(1),
            tx,
        );
        let handle = poller.spawn();
        let _ = rx.recv().await;

        // Consuming shutdown must join the task, not just abort it.
        handle.shutdown().await;
        while rx.try_recv().is_ok() {}
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_cancels_the_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let poller = UnreadPoller::new(
            Arc::new(FixedCounts {
                notifications: 1,
                chats: 1,
                calls: AtomicU32::new(0),
            }),
            Duration::from_secs(1),
            Duration::from_secs(1),
            tx,
        );
        let handle = poller.spawn();
        let _ = rx.recv().await;

        drop(handle);
        // Drain anything already queued, then the channel must close.
        while rx.try_recv().is_ok() {}
        tokio::time::advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected) | Err(mpsc::error::TryRecvError::Empty)
        ));
    }
}
