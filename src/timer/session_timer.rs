use super::scheduler::{Scheduler, TickHandle, TICK_INTERVAL};
use crate::config::TimerConfig;
use crate::domain::Mode;
use crate::notifications::Notifier;
use crate::persistence::SessionStore;
use tracing::{debug, info, warn};

/// Observable countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub mode: Mode,
    pub remaining_seconds: u64,
    pub running: bool,
    pub completed_work_count: u32,
}

/// Break that follows the `completed`-th work session
pub fn next_break(completed: u32, work_sessions_per_long_break: u32) -> Mode {
    if completed % work_sessions_per_long_break.max(1) == 0 {
        Mode::LongBreak
    } else {
        Mode::ShortBreak
    }
}

/// Pomodoro countdown driven by one-second deferred ticks.
///
/// At most one tick is pending at any time. `pause`, `restart` and `skip`
/// cancel it synchronously, and a tick delivered under any other handle is
/// ignored, so a tick always runs against the state it was scheduled for.
pub struct SessionTimer<Sch, St, N> {
    config: TimerConfig,
    state: TimerState,
    pending: Option<TickHandle>,
    refresh_requested: bool,
    scheduler: Sch,
    store: St,
    notifier: N,
}

impl<Sch, St, N> SessionTimer<Sch, St, N>
where
    Sch: Scheduler,
    St: SessionStore,
    N: Notifier,
{
    /// Paused in Work with a full countdown. The completed-session count
    /// continues from today's stored record.
    pub fn new(config: TimerConfig, scheduler: Sch, store: St, notifier: N) -> Self {
        let completed_work_count = match store.load() {
            Ok(record) => record.sessions_count,
            Err(e) => {
                warn!(error = %e, "could not load session record, starting from zero");
                0
            }
        };

        Self {
            config,
            state: TimerState {
                mode: Mode::Work,
                remaining_seconds: config.durations.work,
                running: false,
                completed_work_count,
            },
            pending: None,
            refresh_requested: true,
            scheduler,
            store,
            notifier,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn scheduler(&self) -> &Sch {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Sch {
        &mut self.scheduler
    }

    /// Full length of the current mode
    pub fn current_duration(&self) -> u64 {
        self.config.durations.get(self.state.mode)
    }

    /// Elapsed fraction of the current countdown, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        let total = self.current_duration();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.state.remaining_seconds);
        elapsed as f64 / total as f64
    }

    /// Returns and clears the pending redraw request
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    pub fn start(&mut self) {
        if self.state.running {
            return;
        }
        self.state.running = true;
        self.schedule_tick();
        self.refresh_requested = true;
        debug!(mode = ?self.state.mode, remaining = self.state.remaining_seconds, "timer started");
    }

    pub fn pause(&mut self) {
        self.state.running = false;
        self.cancel_pending();
        self.refresh_requested = true;
        debug!(mode = ?self.state.mode, remaining = self.state.remaining_seconds, "timer paused");
    }

    /// Play/Pause
    pub fn toggle(&mut self) {
        if self.state.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Reset the countdown for the current mode, keeping running/paused
    pub fn restart(&mut self) {
        self.state.remaining_seconds = self.current_duration();
        self.cancel_pending();
        if self.state.running {
            self.schedule_tick();
        }
        self.refresh_requested = true;
    }

    /// Finish the current mode immediately
    pub fn skip(&mut self) {
        self.cancel_pending();
        self.complete_mode();
    }

    /// Deliver a due tick from the scheduler
    pub fn fire(&mut self, handle: TickHandle) {
        if self.pending != Some(handle) {
            debug!(?handle, "ignoring stale tick");
            return;
        }
        self.pending = None;
        self.tick();
    }

    fn tick(&mut self) {
        if !self.state.running {
            return;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.complete_mode();
        } else {
            self.refresh_requested = true;
            self.schedule_tick();
        }
    }

    fn complete_mode(&mut self) {
        let finished = self.state.mode;

        let next = if finished == Mode::Work {
            self.state.completed_work_count += 1;
            if let Err(e) = self.store.increment() {
                warn!(error = %e, "failed to record completed session");
            }
            next_break(
                self.state.completed_work_count,
                self.config.work_sessions_per_long_break,
            )
        } else {
            Mode::Work
        };

        self.state.mode = next;
        self.state.remaining_seconds = self.config.durations.get(next);
        info!(
            finished = finished.label(),
            next = next.label(),
            completed = self.state.completed_work_count,
            "mode complete"
        );

        if let Err(e) = self.notifier.alert(finished, next) {
            debug!(error = %e, "completion alert failed");
        }

        self.refresh_requested = true;

        if self.state.running {
            self.schedule_tick();
        }
    }

    fn schedule_tick(&mut self) {
        self.cancel_pending();
        self.pending = Some(self.scheduler.schedule(TICK_INTERVAL));
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
impl<Sch, St, N> SessionTimer<Sch, St, N> {
    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
