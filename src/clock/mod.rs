//! Frame and Shot Clocks
//!
//! The two countdowns the timer state machine owns. Both are plain values
//! advanced by explicit durations; neither reads the system clock.

pub mod frame;
pub mod shot;

pub use frame::FrameClock;
pub use shot::{ShotClock, ShotState};

/// Whole seconds of a duration, rounded up (`4.2s -> 5`, `5.0s -> 5`)
pub fn ceil_secs(duration: std::time::Duration) -> u64 {
    let nanos = duration.as_nanos();
    nanos.div_ceil(1_000_000_000) as u64
}
