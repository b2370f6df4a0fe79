//! Shot Clock
//!
//! Countdown of the current shot. The budget is fixed when the shot is issued.

use std::fmt;
use std::time::Duration;

/// Shot clock lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShotState {
    /// No shot issued (before frame start)
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Reached zero; waits for the next shot to be issued
    Expired,
}

impl fmt::Display for ShotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShotState::Idle => "idle",
            ShotState::Running => "running",
            ShotState::Expired => "expired",
        })
    }
}

/// Remaining time of the current shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShotClock {
    remaining: Duration,
    budget: Duration,
    state: ShotState,
}

impl ShotClock {
    /// A clock with no shot issued
    pub fn idle() -> Self {
        ShotClock::default()
    }

    /// Start a new shot with `budget`
    pub fn issue(&mut self, budget: Duration) {
        self.budget = budget;
        self.remaining = budget;
        self.state = if budget.is_zero() {
            ShotState::Expired
        } else {
            ShotState::Running
        };
    }

    /// Count down by `dt`, clamped at zero
    ///
    /// Returns the time actually consumed. Only a running clock moves.
    pub fn advance(&mut self, dt: Duration) -> Duration {
        if self.state != ShotState::Running {
            return Duration::ZERO;
        }
        let step = dt.min(self.remaining);
        self.remaining -= step;
        if self.remaining.is_zero() {
            self.state = ShotState::Expired;
        }
        step
    }

    /// Drop the current shot
    pub fn clear(&mut self) {
        *self = ShotClock::idle();
    }

    /// Time left in the shot
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Budget the current shot was issued with
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Lifecycle state
    pub fn state(&self) -> ShotState {
        self.state
    }

    /// True once the countdown reached zero
    pub fn is_expired(&self) -> bool {
        self.state == ShotState::Expired
    }

    /// Remaining time as shown on a shot clock display (rounded up)
    pub fn display_secs(&self) -> u64 {
        super::ceil_secs(self.remaining)
    }
}
