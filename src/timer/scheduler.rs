use std::time::{Duration, Instant};

/// Upper bound on how long the event loop waits for input
pub const POLL_MS: u64 = 250;

/// Delay between countdown ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub fn poll_interval() -> Duration {
    Duration::from_millis(POLL_MS)
}

/// Identifies one scheduled deferred tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// One-shot deferred callbacks that can be cancelled before they fire
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TickHandle;

    /// Cancelling an unknown or already-fired handle is a no-op
    fn cancel(&mut self, handle: TickHandle);
}

/// Scheduler for a polling event loop: holds at most one armed deadline
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    next_id: u64,
    armed: Option<(TickHandle, Instant)>,
}

impl DeadlineScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<TickHandle> {
        self.armed.map(|(handle, _)| handle)
    }

    /// Disarm and return the pending handle once its deadline has passed
    pub fn take_due(&mut self, now: Instant) -> Option<TickHandle> {
        match self.armed {
            Some((handle, deadline)) if now >= deadline => {
                self.armed = None;
                Some(handle)
            }
            _ => None,
        }
    }

    /// Time left before the pending tick is due
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    fn schedule_at(&mut self, deadline: Instant) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.armed = Some((handle, deadline));
        handle
    }
}

impl Scheduler for DeadlineScheduler {
    fn schedule(&mut self, delay: Duration) -> TickHandle {
        self.schedule_at(Instant::now() + delay)
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.pending() == Some(handle) {
            self.armed = None;
        }
    }
}
