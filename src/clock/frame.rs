//! Frame Clock
//!
//! Elapsed time of the current frame against its configured length.

use std::time::Duration;

/// Frame elapsed time and length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    /// Time played so far; only grows until `reset`
    elapsed: Duration,
    /// Configured frame length
    length: Duration,
    /// Remaining time at which the final segment begins
    final_segment: Duration,
}

impl FrameClock {
    /// Create a frame clock at zero elapsed time
    pub fn new(length: Duration, final_segment: Duration) -> Self {
        FrameClock {
            elapsed: Duration::ZERO,
            length,
            final_segment,
        }
    }

    /// Advance by `dt`, stopping at the frame length
    ///
    /// Returns the time actually consumed.
    pub fn advance(&mut self, dt: Duration) -> Duration {
        let step = dt.min(self.remaining());
        self.elapsed += step;
        step
    }

    /// Back to zero elapsed time
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Time played so far
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Configured frame length
    pub fn length(&self) -> Duration {
        self.length
    }

    /// Time left in the frame
    pub fn remaining(&self) -> Duration {
        self.length.saturating_sub(self.elapsed)
    }

    /// True within the last `final_segment` of the frame
    pub fn in_final_segment(&self) -> bool {
        self.remaining() <= self.final_segment
    }

    /// True once the whole frame length has elapsed
    pub fn is_over(&self) -> bool {
        self.elapsed >= self.length
    }
}
