//! Cancellable timers that report back into their owner's queue.

use std::sync::Arc;
use std::time::Duration;

use dockyard_common::{LaunchId, TimerId, WindowId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Re-bounce an application that still wants attention.
    UrgentBounce(WindowId),
    /// A launching icon waited too long for its application.
    LaunchTimeout(LaunchId),
    /// A docked slot launched without an icon waited too long.
    SlotLaunchTimeout(usize),
}

/// A timer expiry. `id` identifies the arming that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFire {
    pub id: TimerId,
    pub kind: TimerKind,
}

/// Where timer fires are delivered.
pub trait TimerSink: Send + Sync {
    /// Deliver `fire`. Returns false once the receiver is gone.
    fn fire(&self, fire: TimerFire) -> bool;
}

impl TimerSink for mpsc::UnboundedSender<TimerFire> {
    fn fire(&self, fire: TimerFire) -> bool {
        self.send(fire).is_ok()
    }
}

/// An armed timer. Dropping it cancels it.
#[derive(Debug)]
pub struct TimerTask {
    id: TimerId,
    kind: TimerKind,
    handle: JoinHandle<()>,
}

impl TimerTask {
    /// Fire every `period`, first after one full period.
    pub fn repeating(sink: Arc<dyn TimerSink>, kind: TimerKind, period: Duration) -> Self {
        let id = TimerId::next();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !sink.fire(TimerFire { id, kind }) {
                    break;
                }
            }
        });
        debug!(%id, ?kind, ?period, "repeating timer armed");
        Self { id, kind, handle }
    }

    /// Fire once after `delay`.
    pub fn once(sink: Arc<dyn TimerSink>, kind: TimerKind, delay: Duration) -> Self {
        let id = TimerId::next();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sink.fire(TimerFire { id, kind });
        });
        debug!(%id, ?kind, ?delay, "one-shot timer armed");
        Self { id, kind, handle }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Whether `fire` came from this arming.
    pub fn produced(&self, fire: &TimerFire) -> bool {
        fire.id == self.id
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TimerTask {
    fn drop(&mut self) {
        self.handle.abort();
        debug!(id = %self.id, "timer cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink() -> (Arc<dyn TimerSink>, mpsc::UnboundedReceiver<TimerFire>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink: Arc<dyn TimerSink> = Arc::new(tx);
        (sink, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn repeating_timer_fires_each_period() {
        let (sink, mut rx) = sink();
        let kind = TimerKind::UrgentBounce(WindowId(1));
        let timer = TimerTask::repeating(sink, kind, Duration::from_millis(3000));

        tokio::time::sleep(Duration::from_millis(9100)).await;
        let mut fires = Vec::new();
        while let Ok(fire) = rx.try_recv() {
            fires.push(fire);
        }
        assert_eq!(fires.len(), 3);
        assert!(fires.iter().all(|f| timer.produced(f) && f.kind == kind));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_timer_never_fires() {
        let (sink, mut rx) = sink();
        let timer = TimerTask::once(
            sink,
            TimerKind::LaunchTimeout(LaunchId(4)),
            Duration::from_millis(100),
        );
        timer.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn one_shot_fires_once() {
        let (sink, mut rx) = sink();
        let _timer = TimerTask::once(
            sink,
            TimerKind::SlotLaunchTimeout(2),
            Duration::from_millis(100),
        );
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(rx.try_recv().unwrap().kind, TimerKind::SlotLaunchTimeout(2));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_gives_a_new_id() {
        let (sink, _rx) = sink();
        let kind = TimerKind::UrgentBounce(WindowId(1));
        let first = TimerTask::repeating(sink.clone(), kind, Duration::from_secs(3));
        let second = TimerTask::repeating(sink, kind, Duration::from_secs(3));
        assert_ne!(first.id(), second.id());
    }
}
