//! Deferred session events
//!
//! The engine never sleeps. It asks a `Scheduler` to deliver a `TimerEvent`
//! after a delay and keeps the returned handle. When the timer fires, the
//! driver hands the `FiredTimer` back to the engine, which applies it only if
//! the handle is still the live one. Cancelled or superseded timers are
//! therefore harmless even if their message was already in flight.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    /// Move from `countdown` to `in-progress`
    CountdownElapsed,
    /// Flip a mismatched pair back face-down
    MismatchResolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub event: TimerEvent,
}

/// Schedule-after-delay and cancel, the only capabilities the engine needs
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle;

    /// Cancel a pending timer. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

// ==================== Tokio ====================

/// Scheduler backed by tokio tasks; fired timers arrive on a channel
pub struct TokioScheduler {
    sender: mpsc::Sender<FiredTimer>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its timers fire into.
    /// Must be used from within a tokio runtime.
    pub fn new() -> (Self, mpsc::Receiver<FiredTimer>) {
        let (tx, rx) = mpsc::channel(32);
        let scheduler = Self {
            sender: tx,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (scheduler, rx)
    }

    /// Number of timers that have not fired or been cancelled
    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|t| !t.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());

        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let sender = self.sender.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if sender.send(FiredTimer { handle, event }).await.is_err() {
                log::debug!("Timer {:?} fired after its receiver closed", handle);
            }
        });
        self.tasks.insert(handle, task);

        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

// ==================== Manual ====================

/// Scheduler driven by explicit calls to `advance`; used for tests and
/// deterministic replays
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<(TimerHandle, Duration, TimerEvent)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move virtual time forward and return every timer that came due, in
    /// firing order
    pub fn advance(&mut self, by: Duration) -> Vec<FiredTimer> {
        self.now += by;

        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(_, at, _)| *at <= now);
        self.pending = waiting;

        due.sort_by_key(|(handle, at, _)| (*at, *handle));
        due.into_iter()
            .map(|(handle, _, event)| FiredTimer { handle, event })
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, event: TimerEvent) -> bool {
        self.pending.iter().any(|(_, _, e)| *e == event)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push((handle, self.now + delay, event));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(h, _, _)| *h != handle);
    }
}
