//! Rest-timer state machine.
//!
//! A single countdown shown between completed sets. The timer is a plain
//! value driven by its owner: the scheduler calls [`RestTimer::tick`] once
//! per second while running, and [`RestTimer::dismiss`] after the short
//! grace delay that follows expiry. Dropping the timer cancels everything -
//! there are no ambient callbacks.

use std::time::Duration;

/// Fixed preset durations offered to the user, in seconds
pub const REST_PRESETS: [u32; 4] = [30, 60, 90, 120];

/// Grace delay between expiry and auto-dismissal, letting the completion
/// animation finish. Cancellable via [`RestTimer::skip`].
pub const EXPIRY_GRACE: Duration = Duration::from_millis(500);

/// Current state of the countdown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestTimerState {
    Idle,
    Running { remaining: u32, total: u32 },
    Expired,
}

/// Outcome of a clock tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown continues with this many seconds left
    Running { remaining: u32 },
    /// Countdown just reached zero; schedule a dismissal after [`EXPIRY_GRACE`]
    Expired,
    /// Timer was not running; nothing happened
    Idle,
}

/// The rest-timer countdown. One instance is active per workout session.
#[derive(Clone, Debug)]
pub struct RestTimer {
    state: RestTimerState,
    selected: u32,
}

impl RestTimer {
    /// Create an idle timer with the given default duration selected
    pub fn new(default_seconds: u32) -> Self {
        Self {
            state: RestTimerState::Idle,
            selected: default_seconds,
        }
    }

    pub fn state(&self) -> RestTimerState {
        self.state
    }

    /// Currently selected duration in seconds
    pub fn selected(&self) -> u32 {
        self.selected
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RestTimerState::Running { .. })
    }

    /// Seconds left on the countdown (0 when idle or expired)
    pub fn remaining(&self) -> u32 {
        match self.state {
            RestTimerState::Running { remaining, .. } => remaining,
            _ => 0,
        }
    }

    /// Fraction of the countdown remaining, for the progress ring
    pub fn progress(&self) -> f64 {
        match self.state {
            RestTimerState::Running { remaining, total } if total > 0 => {
                f64::from(remaining) / f64::from(total)
            }
            _ => 0.0,
        }
    }

    /// Start the countdown at the given duration
    pub fn start(&mut self, duration_seconds: u32) {
        self.state = RestTimerState::Running {
            remaining: duration_seconds,
            total: duration_seconds,
        };
        tracing::debug!("Rest timer started: {}s", duration_seconds);
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        match self.state {
            RestTimerState::Running { remaining, total } if remaining > 1 => {
                self.state = RestTimerState::Running {
                    remaining: remaining - 1,
                    total,
                };
                TickOutcome::Running {
                    remaining: remaining - 1,
                }
            }
            RestTimerState::Running { .. } => {
                self.state = RestTimerState::Expired;
                tracing::debug!("Rest timer expired");
                TickOutcome::Expired
            }
            _ => TickOutcome::Idle,
        }
    }

    /// Select a preset duration, restarting the countdown at it.
    ///
    /// Returns the new default rest duration when the selection changed, so
    /// the owning session can persist it for subsequent rests. Re-selecting
    /// the current preset restarts the countdown but reports nothing.
    /// Durations outside [`REST_PRESETS`] are ignored.
    pub fn select_preset(&mut self, duration_seconds: u32) -> Option<u32> {
        if !REST_PRESETS.contains(&duration_seconds) {
            tracing::warn!("Ignoring non-preset rest duration: {}s", duration_seconds);
            return None;
        }

        let changed = self.selected != duration_seconds;
        self.selected = duration_seconds;
        self.start(duration_seconds);

        changed.then_some(duration_seconds)
    }

    /// Cancel the countdown (or the pending expiry dismissal) and go idle
    pub fn skip(&mut self) {
        self.state = RestTimerState::Idle;
    }

    /// Auto-dismiss after expiry. Called by the scheduler once
    /// [`EXPIRY_GRACE`] has elapsed; a no-op if `skip` already ran.
    ///
    /// Returns true if the timer closed (i.e. it was still expired).
    pub fn dismiss(&mut self) -> bool {
        if self.state == RestTimerState::Expired {
            self.state = RestTimerState::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_idle() {
        let timer = RestTimer::new(60);
        assert_eq!(timer.state(), RestTimerState::Idle);
        assert_eq!(timer.selected(), 60);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_full_countdown_expires_exactly_once() {
        let mut timer = RestTimer::new(60);
        timer.start(60);

        let mut expiries = 0;
        for _ in 0..60 {
            if timer.tick() == TickOutcome::Expired {
                expiries += 1;
            }
        }

        assert_eq!(expiries, 1);
        assert_eq!(timer.state(), RestTimerState::Expired);

        // Further ticks do nothing
        assert_eq!(timer.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_tick_counts_down() {
        let mut timer = RestTimer::new(60);
        timer.start(3);

        assert_eq!(timer.tick(), TickOutcome::Running { remaining: 2 });
        assert_eq!(timer.tick(), TickOutcome::Running { remaining: 1 });
        assert_eq!(timer.tick(), TickOutcome::Expired);
    }

    #[test]
    fn test_skip_cancels_countdown() {
        let mut timer = RestTimer::new(60);
        timer.start(60);
        timer.tick();

        timer.skip();
        assert_eq!(timer.state(), RestTimerState::Idle);
        assert_eq!(timer.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_skip_cancels_pending_dismissal() {
        let mut timer = RestTimer::new(60);
        timer.start(1);
        assert_eq!(timer.tick(), TickOutcome::Expired);

        // User skips during the grace window
        timer.skip();
        assert!(!timer.dismiss());
        assert_eq!(timer.state(), RestTimerState::Idle);
    }

    #[test]
    fn test_dismiss_after_expiry() {
        let mut timer = RestTimer::new(60);
        timer.start(1);
        timer.tick();

        assert!(timer.dismiss());
        assert_eq!(timer.state(), RestTimerState::Idle);
    }

    #[test]
    fn test_select_preset_reports_change_once() {
        let mut timer = RestTimer::new(60);

        assert_eq!(timer.select_preset(90), Some(90));
        assert_eq!(timer.state(), RestTimerState::Running { remaining: 90, total: 90 });

        // Idempotent re-selection: countdown restarts, no change reported
        timer.tick();
        assert_eq!(timer.select_preset(90), None);
        assert_eq!(timer.remaining(), 90);
    }

    #[test]
    fn test_select_preset_ignores_unknown_duration() {
        let mut timer = RestTimer::new(60);
        assert_eq!(timer.select_preset(45), None);
        assert_eq!(timer.state(), RestTimerState::Idle);
        assert_eq!(timer.selected(), 60);
    }

    #[test]
    fn test_restart_from_expired() {
        let mut timer = RestTimer::new(60);
        timer.start(1);
        timer.tick();
        assert_eq!(timer.state(), RestTimerState::Expired);

        timer.start(30);
        assert_eq!(timer.remaining(), 30);
    }

    #[test]
    fn test_progress_fraction() {
        let mut timer = RestTimer::new(60);
        timer.start(100);
        for _ in 0..25 {
            timer.tick();
        }
        assert!((timer.progress() - 0.75).abs() < 1e-9);

        timer.skip();
        assert_eq!(timer.progress(), 0.0);
    }
}
