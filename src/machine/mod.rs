//! Shot/Frame Timer State Machine
//!
//! Owns the frame and shot clocks and is the only thing that mutates them.
//! Time only moves through [`TimerMachine::tick`]; remote buttons only act
//! through [`TimerMachine::handle_event`]. Both are synchronous and never block,
//! so a sequence of ticks and events always produces the same cues.
//!
//! ```text
//!            Start                      elapsed == length
//!   Idle ──────────────▶ Running ─────────────────────────▶ FrameOver
//!    ▲                   │    ▲
//!    │             Pause │    │ Start
//!    │                   ▼    │
//!    └──── ResetFrame ── Paused
//! ```

mod cues;

pub use cues::Cue;

use crate::clock::{FrameClock, ShotClock};
use crate::config::{FrameLength, TimerConfig};
use crate::Result;
use std::fmt;
use std::time::Duration;

/// Top-level timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MachineState {
    /// Waiting for the frame to start
    #[default]
    Idle,
    /// Clocks advance with every tick
    Running,
    /// Clocks frozen until Start
    Paused,
    /// Frame length reached; only ResetFrame is accepted
    FrameOver,
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MachineState::Idle => "IDLE",
            MachineState::Running => "RUNNING",
            MachineState::Paused => "PAUSED",
            MachineState::FrameOver => "FRAME OVER",
        })
    }
}

/// Decoded remote-control button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteEvent {
    /// Start the frame, or resume when paused
    Start,
    /// Freeze both clocks
    Pause,
    /// Single start/stop button: Start when idle or paused, Pause when running
    Toggle,
    /// Restart the current shot with the current budget
    ResetShot,
    /// Abandon the frame and return to idle
    ResetFrame,
    /// Choose the frame length (idle only)
    SelectFrame(FrameLength),
}

impl fmt::Display for RemoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteEvent::Start => f.write_str("start"),
            RemoteEvent::Pause => f.write_str("pause"),
            RemoteEvent::Toggle => f.write_str("toggle"),
            RemoteEvent::ResetShot => f.write_str("reset-shot"),
            RemoteEvent::ResetFrame => f.write_str("reset-frame"),
            RemoteEvent::SelectFrame(length) => write!(f, "select-frame {length}"),
        }
    }
}

/// Input the machine ignored; returned to the caller, never fatal
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    /// Tick with a zero (non-positive) time step
    #[error("tick with non-positive time step ignored")]
    InvalidTick,

    /// Event not valid in the current state
    #[error("{event} ignored while {state}")]
    UnexpectedEvent {
        /// State at the time of the event
        state: MachineState,
        /// The ignored event
        event: RemoteEvent,
    },

    /// Frame length the current configuration cannot accommodate
    #[error("frame length {length} rejected: {reason}")]
    FrameLengthRejected {
        /// Requested length
        length: FrameLength,
        /// Validation message
        reason: String,
    },
}

/// What a single tick produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Cues due during this tick, in time order
    pub cues: Vec<Cue>,
    /// Shots that expired during this tick
    pub shots_expired: u32,
    /// The frame ended during this tick
    pub frame_over: bool,
}

/// The shot/frame timer
#[derive(Debug, Clone)]
pub struct TimerMachine {
    config: TimerConfig,
    state: MachineState,
    frame: FrameClock,
    shot: ShotClock,
    /// Shots issued since frame start, including the current one
    shot_number: u32,
}

impl TimerMachine {
    /// Build a machine in `Idle`; fails on an invalid configuration
    pub fn new(config: TimerConfig) -> Result<Self> {
        config.validate()?;
        let frame = FrameClock::new(config.frame_length.duration(), config.final_segment());
        Ok(TimerMachine {
            config,
            state: MachineState::Idle,
            frame,
            shot: ShotClock::idle(),
            shot_number: 0,
        })
    }

    /// Current state
    pub fn state(&self) -> MachineState {
        self.state
    }

    /// Frame clock snapshot
    pub fn frame(&self) -> &FrameClock {
        &self.frame
    }

    /// Shot clock snapshot
    pub fn shot(&self) -> &ShotClock {
        &self.shot
    }

    /// Active configuration
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Number of the current shot within the frame (0 before Start)
    pub fn shot_number(&self) -> u32 {
        self.shot_number
    }

    /// Budget a shot issued right now would get
    pub fn current_budget(&self) -> Duration {
        if self.frame.in_final_segment() {
            self.config.final_shot()
        } else {
            self.config.normal_shot()
        }
    }

    /// Apply one remote event; returns the state after it
    pub fn handle_event(&mut self, event: RemoteEvent) -> std::result::Result<MachineState, Ignored> {
        use MachineState::*;

        match (self.state, event) {
            (_, RemoteEvent::ResetFrame) => {
                self.frame.reset();
                self.shot.clear();
                self.shot_number = 0;
                self.state = Idle;
            }
            (FrameOver, _) => return Err(self.unexpected(event)),
            (Idle, RemoteEvent::Start | RemoteEvent::Toggle) => {
                self.frame.reset();
                self.shot_number = 0;
                self.issue_shot();
                self.state = Running;
            }
            (Paused, RemoteEvent::Start | RemoteEvent::Toggle) => self.state = Running,
            (Running, RemoteEvent::Pause | RemoteEvent::Toggle) => self.state = Paused,
            (Running | Paused, RemoteEvent::ResetShot) => {
                let budget = self.current_budget();
                self.shot.issue(budget);
            }
            (Idle, RemoteEvent::SelectFrame(length)) => self.select_frame(length)?,
            _ => return Err(self.unexpected(event)),
        }

        Ok(self.state)
    }

    /// Advance time by `dt`
    ///
    /// Outside `Running` the clocks do not move and the report is empty. A
    /// single long step may expire several shots and end the frame; cues come
    /// back in the order they fell due.
    pub fn tick(&mut self, dt: Duration) -> std::result::Result<TickReport, Ignored> {
        if dt.is_zero() {
            return Err(Ignored::InvalidTick);
        }

        let mut report = TickReport::default();
        let mut left = dt;

        while self.state == MachineState::Running && !left.is_zero() {
            let step = left.min(self.shot.remaining()).min(self.frame.remaining());
            if step.is_zero() {
                break;
            }

            let before = self.shot.remaining();
            self.frame.advance(step);
            self.shot.advance(step);
            left -= step;

            cues::countdown_cues(
                before,
                self.shot.remaining(),
                self.config.beep_window_secs,
                &mut report.cues,
            );

            // A shot expiring on the frame end still gets its long beep
            if self.shot.is_expired() {
                report.cues.push(Cue::LongBeep);
                report.shots_expired += 1;
            }

            if self.frame.is_over() {
                self.state = MachineState::FrameOver;
                report.frame_over = true;
            } else if self.shot.is_expired() {
                self.issue_shot();
            }
        }

        Ok(report)
    }

    /// New shot with the budget of the current segment, fixed until it ends
    fn issue_shot(&mut self) {
        let budget = self.current_budget();
        self.shot.issue(budget);
        self.shot_number += 1;
    }

    fn select_frame(&mut self, length: FrameLength) -> std::result::Result<(), Ignored> {
        let config = TimerConfig {
            frame_length: length,
            ..self.config.clone()
        };
        config
            .validate()
            .map_err(|e| Ignored::FrameLengthRejected {
                length,
                reason: e.to_string(),
            })?;

        self.frame = FrameClock::new(length.duration(), config.final_segment());
        self.config = config;
        Ok(())
    }

    fn unexpected(&self, event: RemoteEvent) -> Ignored {
        Ignored::UnexpectedEvent {
            state: self.state,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ShotState;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn running(config: TimerConfig) -> TimerMachine {
        let mut machine = TimerMachine::new(config).unwrap();
        machine.handle_event(RemoteEvent::Start).unwrap();
        machine
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = TimerConfig {
            normal_shot_secs: 0,
            ..TimerConfig::default()
        };
        assert!(TimerMachine::new(config).is_err());
    }

    #[test]
    fn test_start_issues_first_shot() {
        let machine = running(TimerConfig::default());
        assert_eq!(machine.state(), MachineState::Running);
        assert_eq!(machine.frame().elapsed(), Duration::ZERO);
        assert_eq!(machine.shot().remaining(), secs(15));
        assert_eq!(machine.shot().state(), ShotState::Running);
        assert_eq!(machine.shot_number(), 1);
    }

    #[test]
    fn test_ticks_while_idle_or_paused_do_nothing() {
        let mut machine = TimerMachine::new(TimerConfig::default()).unwrap();
        assert_eq!(machine.tick(secs(3)).unwrap(), TickReport::default());
        assert_eq!(machine.frame().elapsed(), Duration::ZERO);

        machine.handle_event(RemoteEvent::Start).unwrap();
        machine.tick(secs(2)).unwrap();
        machine.handle_event(RemoteEvent::Pause).unwrap();
        assert_eq!(machine.tick(secs(30)).unwrap(), TickReport::default());
        assert_eq!(machine.frame().elapsed(), secs(2));
        assert_eq!(machine.shot().remaining(), secs(13));

        machine.handle_event(RemoteEvent::Start).unwrap();
        machine.tick(secs(1)).unwrap();
        assert_eq!(machine.shot().remaining(), secs(12));
    }

    #[test]
    fn test_zero_tick_is_ignored() {
        let mut machine = running(TimerConfig::default());
        machine.tick(secs(3)).unwrap();
        let before = machine.clone();

        assert_eq!(machine.tick(Duration::ZERO), Err(Ignored::InvalidTick));
        assert_eq!(machine.shot(), before.shot());
        assert_eq!(machine.frame(), before.frame());
    }

    #[test]
    fn test_toggle_starts_pauses_and_resumes() {
        let mut machine = TimerMachine::new(TimerConfig::default()).unwrap();
        assert_eq!(
            machine.handle_event(RemoteEvent::Toggle),
            Ok(MachineState::Running)
        );
        assert_eq!(
            machine.handle_event(RemoteEvent::Toggle),
            Ok(MachineState::Paused)
        );
        assert_eq!(
            machine.handle_event(RemoteEvent::Toggle),
            Ok(MachineState::Running)
        );
        assert_eq!(machine.shot_number(), 1);
    }

    #[test]
    fn test_unexpected_events_are_reported() {
        let mut machine = TimerMachine::new(TimerConfig::default()).unwrap();
        assert_eq!(
            machine.handle_event(RemoteEvent::Pause),
            Err(Ignored::UnexpectedEvent {
                state: MachineState::Idle,
                event: RemoteEvent::Pause,
            })
        );
        assert!(machine.handle_event(RemoteEvent::ResetShot).is_err());

        machine.handle_event(RemoteEvent::Start).unwrap();
        assert!(machine.handle_event(RemoteEvent::Start).is_err());
        assert!(machine
            .handle_event(RemoteEvent::SelectFrame(FrameLength::Minutes30))
            .is_err());
        assert_eq!(machine.state(), MachineState::Running);
    }

    #[test]
    fn test_reset_shot_keeps_frame_and_state() {
        let mut machine = running(TimerConfig::default());
        machine.tick(secs(8)).unwrap();
        machine.handle_event(RemoteEvent::Pause).unwrap();

        assert_eq!(
            machine.handle_event(RemoteEvent::ResetShot),
            Ok(MachineState::Paused)
        );
        assert_eq!(machine.shot().remaining(), secs(15));
        assert_eq!(machine.frame().elapsed(), secs(8));
    }

    #[test]
    fn test_reset_frame_from_every_state() {
        let mut machine = running(TimerConfig::default());
        machine.tick(secs(100)).unwrap();
        assert_eq!(
            machine.handle_event(RemoteEvent::ResetFrame),
            Ok(MachineState::Idle)
        );
        assert_eq!(machine.frame().elapsed(), Duration::ZERO);
        assert_eq!(machine.shot().state(), ShotState::Idle);
        assert_eq!(machine.shot_number(), 0);

        machine.handle_event(RemoteEvent::Start).unwrap();
        machine.tick(secs(1200)).unwrap();
        assert_eq!(machine.state(), MachineState::FrameOver);
        assert_eq!(
            machine.handle_event(RemoteEvent::ResetFrame),
            Ok(MachineState::Idle)
        );
    }

    #[test]
    fn test_frame_over_ignores_everything_but_reset_frame() {
        let mut machine = running(TimerConfig::with_frame_length(
            FrameLength::Minutes5Secs30,
        ));
        let report = machine.tick(secs(400)).unwrap();
        assert!(report.frame_over);
        assert_eq!(machine.frame().elapsed(), secs(330));

        for event in [
            RemoteEvent::Start,
            RemoteEvent::Pause,
            RemoteEvent::Toggle,
            RemoteEvent::ResetShot,
        ] {
            assert!(matches!(
                machine.handle_event(event),
                Err(Ignored::UnexpectedEvent {
                    state: MachineState::FrameOver,
                    ..
                })
            ));
        }
        assert_eq!(machine.tick(secs(1)).unwrap(), TickReport::default());
    }

    #[test]
    fn test_select_frame_while_idle() {
        let mut machine = TimerMachine::new(TimerConfig::default()).unwrap();
        machine
            .handle_event(RemoteEvent::SelectFrame(FrameLength::Minutes30))
            .unwrap();
        assert_eq!(machine.frame().length(), secs(1800));
        assert_eq!(machine.config().frame_length, FrameLength::Minutes30);
    }

    #[test]
    fn test_select_frame_rejected_when_final_segment_too_long() {
        let config = TimerConfig {
            final_segment_secs: 600,
            ..TimerConfig::default()
        };
        let mut machine = TimerMachine::new(config).unwrap();
        let result = machine.handle_event(RemoteEvent::SelectFrame(FrameLength::Minutes5Secs30));
        assert!(matches!(
            result,
            Err(Ignored::FrameLengthRejected {
                length: FrameLength::Minutes5Secs30,
                ..
            })
        ));
        assert_eq!(machine.frame().length(), secs(1200));
    }

    #[test]
    fn test_long_tick_spans_several_shots() {
        let mut machine = running(TimerConfig::default());
        let report = machine.tick(secs(45)).unwrap();

        assert_eq!(report.shots_expired, 3);
        assert_eq!(report.cues.len(), 18);
        assert_eq!(machine.shot_number(), 4);
        assert_eq!(machine.shot().remaining(), secs(15));
        let longs: Vec<usize> = report
            .cues
            .iter()
            .enumerate()
            .filter(|(_, cue)| **cue == Cue::LongBeep)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(longs, vec![5, 11, 17]);
    }

    #[test]
    fn test_shot_expiring_on_frame_end_sounds_long_beep() {
        let mut machine = running(TimerConfig::with_frame_length(
            FrameLength::Minutes5Secs30,
        ));
        // 2 shots of 15 s, then 30 shots of 10 s; the last one ends with the frame
        let report = machine.tick(secs(330)).unwrap();

        assert!(report.frame_over);
        assert_eq!(report.shots_expired, 32);
        assert_eq!(report.cues.len(), 32 * 6);
        assert_eq!(report.cues.last(), Some(&Cue::LongBeep));
        assert_eq!(machine.shot_number(), 32);
        assert_eq!(machine.shot().state(), ShotState::Expired);
        assert_eq!(machine.state(), MachineState::FrameOver);
    }

    #[test]
    fn test_remaining_stays_within_budget() {
        let mut machine = running(TimerConfig::default());
        let steps = [7u64, 330, 1_000, 2_500, 40, 999, 15_000, 3];
        for _ in 0..300 {
            for &ms in &steps {
                machine.tick(Duration::from_millis(ms)).unwrap();
                let shot = machine.shot();
                assert!(shot.remaining() <= shot.budget());
                if machine.state() == MachineState::FrameOver {
                    return;
                }
            }
        }
        panic!("frame never ended");
    }
}
