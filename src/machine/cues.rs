//! Countdown cues
//!
//! Which beeps are due when a shot clock moves from one remaining time to
//! another within the same step.

use std::fmt;
use std::time::Duration;

/// Audible signal request for the buzzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// One second of the countdown window passed (5, 4, 3, 2, 1)
    ShortBeep,
    /// The shot expired
    LongBeep,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cue::ShortBeep => "short beep",
            Cue::LongBeep => "long beep",
        })
    }
}

/// Push one short cue per whole-second boundary of the window crossed
/// when the shot clock went from `before` to `after`.
///
/// Boundary `k` is crossed when `ceil(remaining)` becomes `k`, i.e.
/// `after <= k < before`.
pub(crate) fn countdown_cues(
    before: Duration,
    after: Duration,
    window_secs: u64,
    out: &mut Vec<Cue>,
) {
    for second in (1..=window_secs).rev() {
        let boundary = Duration::from_secs(second);
        if after <= boundary && boundary < before {
            out.push(Cue::ShortBeep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cues(before_ms: u64, after_ms: u64) -> Vec<Cue> {
        let mut out = Vec::new();
        countdown_cues(
            Duration::from_millis(before_ms),
            Duration::from_millis(after_ms),
            5,
            &mut out,
        );
        out
    }

    #[test]
    fn test_no_cue_outside_window() {
        assert!(cues(15_000, 6_000).is_empty());
        assert!(cues(6_000, 5_001).is_empty());
    }

    #[test]
    fn test_entering_window_exactly_at_five() {
        assert_eq!(cues(6_000, 5_000), vec![Cue::ShortBeep]);
    }

    #[test]
    fn test_coarse_step_emits_every_crossed_second() {
        assert_eq!(cues(15_000, 500), vec![Cue::ShortBeep; 5]);
        assert_eq!(cues(4_200, 1_900), vec![Cue::ShortBeep; 2]);
    }

    #[test]
    fn test_boundary_reached_exactly_is_announced() {
        assert_eq!(cues(5_500, 4_000), vec![Cue::ShortBeep; 2]);
        assert_eq!(cues(2_000, 1_000), vec![Cue::ShortBeep]);
    }

    #[test]
    fn test_zero_is_not_a_short_cue() {
        assert_eq!(cues(1_000, 0), vec![]);
    }
}
