use crate::config::TimerConfig;
use crate::notifications::{Notifier, SystemNotifier};
use crate::persistence::{JsonSessionStore, SessionStore};
use crate::timer::{poll_interval, DeadlineScheduler, SessionTimer};
use std::time::{Duration, Instant};

/// State of the Pomodoro window
pub struct PomodoroApp<St = JsonSessionStore, N = SystemNotifier> {
    pub timer: SessionTimer<DeadlineScheduler, St, N>,
}

impl<St: SessionStore, N: Notifier> PomodoroApp<St, N> {
    pub fn new(config: TimerConfig, store: St, notifier: N) -> Self {
        Self {
            timer: SessionTimer::new(config, DeadlineScheduler::new(), store, notifier),
        }
    }

    /// Deliver the pending tick if it is due at `now`. Returns whether one fired.
    pub fn pump(&mut self, now: Instant) -> bool {
        match self.timer.scheduler_mut().take_due(now) {
            Some(handle) => {
                self.timer.fire(handle);
                true
            }
            None => false,
        }
    }

    /// How long the event loop may block waiting for input
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        let poll = poll_interval();
        self.timer
            .scheduler()
            .time_until_due(now)
            .map_or(poll, |due| due.min(poll))
    }

    pub fn take_redraw(&mut self) -> bool {
        self.timer.take_refresh()
    }
}
