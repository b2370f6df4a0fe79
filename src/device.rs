//! Device loop
//!
//! One [`Device::step`] per tick: drain the remote queue, apply every event in
//! arrival order, advance the clocks, hand the resulting cues to the buzzer.

use crate::buzzer::CueSink;
use crate::clock::ceil_secs;
use crate::machine::{MachineState, TickReport, TimerMachine};
use crate::remote::SharedQueue;
use std::sync::Arc;
use std::time::Duration;

/// Format whole seconds as `MM:SS`
pub fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Outcome of one device step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Events the machine accepted
    pub events_applied: usize,
    /// Events the machine ignored
    pub events_ignored: usize,
    /// What the tick produced
    pub tick: TickReport,
    /// State after the step
    pub state: MachineState,
}

/// Timer machine wired to its remote queue and buzzer
pub struct Device<S: CueSink> {
    machine: TimerMachine,
    queue: SharedQueue,
    sink: S,
    /// Last (frame, shot) seconds written to the status log
    last_status: Option<(u64, u64)>,
}

impl<S: CueSink> Device<S> {
    /// Assemble a device
    pub fn new(machine: TimerMachine, queue: SharedQueue, sink: S) -> Self {
        Device {
            machine,
            queue,
            sink,
            last_status: None,
        }
    }

    /// Process queued events, then advance time by `dt`
    pub fn step(&mut self, dt: Duration) -> StepReport {
        let mut report = StepReport::default();

        let events = self.queue.lock().drain();
        for event in events {
            let before = self.machine.state();
            match self.machine.handle_event(event) {
                Ok(after) => {
                    report.events_applied += 1;
                    if before != after {
                        log::info!("{before} -> {after} ({event})");
                    } else {
                        log::debug!("{event} applied while {after}");
                    }
                }
                Err(ignored) => {
                    report.events_ignored += 1;
                    log::debug!("{ignored}");
                }
            }
        }

        report.tick = match self.machine.tick(dt) {
            Ok(tick) => tick,
            Err(ignored) => {
                log::debug!("{ignored}");
                TickReport::default()
            }
        };

        for &cue in &report.tick.cues {
            log::debug!("{cue} (shot {})", self.machine.shot_number());
            self.sink.play_cue(cue);
        }
        if report.tick.frame_over {
            log::info!(
                "{} -> {} after {}",
                MachineState::Running,
                MachineState::FrameOver,
                format_clock(self.machine.frame().elapsed().as_secs())
            );
            self.sink.frame_over();
        }

        report.state = self.machine.state();
        self.log_status();
        report
    }

    /// One-line status: state, frame remaining, shot remaining
    pub fn status_line(&self) -> String {
        let frame = self.machine.frame();
        let shot = self.machine.shot();
        let segment = if frame.in_final_segment() { " FINAL" } else { "" };
        format!(
            "{} | frame {}{} | shot {:02} | #{}",
            self.machine.state(),
            format_clock(ceil_secs(frame.remaining())),
            segment,
            shot.display_secs(),
            self.machine.shot_number()
        )
    }

    fn log_status(&mut self) {
        if self.machine.state() != MachineState::Running {
            self.last_status = None;
            return;
        }
        let current = (
            ceil_secs(self.machine.frame().remaining()),
            self.machine.shot().display_secs(),
        );
        if self.last_status != Some(current) {
            self.last_status = Some(current);
            log::info!("{}", self.status_line());
        }
    }

    /// Let the buzzer play out every cue already handed to it
    pub fn finish(&mut self) {
        self.sink.wait_for_finish();
    }

    /// The timer
    pub fn machine(&self) -> &TimerMachine {
        &self.machine
    }

    /// The buzzer
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Handle of the remote queue, for producers
    pub fn queue(&self) -> SharedQueue {
        Arc::clone(&self.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimerConfig;
    use crate::machine::{Cue, RemoteEvent};
    use crate::remote::EventQueue;

    #[derive(Default)]
    struct Recorder {
        cues: Vec<Cue>,
        frames_over: usize,
        finished: bool,
    }

    impl CueSink for Recorder {
        fn play_cue(&mut self, cue: Cue) {
            self.cues.push(cue);
        }

        fn frame_over(&mut self) {
            self.frames_over += 1;
        }

        fn wait_for_finish(&mut self) {
            self.finished = true;
        }
    }

    fn device() -> Device<Recorder> {
        let machine = TimerMachine::new(TimerConfig::default()).unwrap();
        Device::new(machine, EventQueue::shared(8), Recorder::default())
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(330), "05:30");
        assert_eq!(format_clock(1800), "30:00");
    }

    #[test]
    fn test_events_apply_before_time_advance() {
        let mut device = device();
        device.queue().lock().push(RemoteEvent::Start);

        let report = device.step(Duration::from_secs(1));
        assert_eq!(report.events_applied, 1);
        assert_eq!(report.state, MachineState::Running);
        assert_eq!(
            device.machine().shot().remaining(),
            Duration::from_secs(14)
        );
    }

    #[test]
    fn test_all_queued_events_processed_in_order() {
        let mut device = device();
        {
            let queue = device.queue();
            let mut queue = queue.lock();
            queue.push(RemoteEvent::Start);
            queue.push(RemoteEvent::Pause);
            queue.push(RemoteEvent::Pause);
        }

        let report = device.step(Duration::from_secs(1));
        assert_eq!(report.events_applied, 2);
        assert_eq!(report.events_ignored, 1);
        assert_eq!(report.state, MachineState::Paused);
        assert_eq!(device.machine().frame().elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_cues_reach_the_sink() {
        let mut device = device();
        device.queue().lock().push(RemoteEvent::Start);
        for _ in 0..15 {
            device.step(Duration::from_secs(1));
        }

        let mut expected = vec![Cue::ShortBeep; 5];
        expected.push(Cue::LongBeep);
        assert_eq!(device.sink().cues, expected);
    }

    #[test]
    fn test_frame_over_notifies_sink() {
        let mut device = device();
        device.queue().lock().push(RemoteEvent::Start);
        let report = device.step(Duration::from_secs(1300));

        assert!(report.tick.frame_over);
        assert_eq!(report.state, MachineState::FrameOver);
        assert_eq!(device.sink().frames_over, 1);
    }

    #[test]
    fn test_finish_waits_on_the_sink() {
        let mut device = device();
        device.queue().lock().push(RemoteEvent::Start);
        device.step(Duration::from_secs(15));
        assert!(!device.sink().finished);

        device.finish();
        assert!(device.sink().finished);
        assert_eq!(device.sink().cues.last(), Some(&Cue::LongBeep));
    }

    #[test]
    fn test_zero_step_is_harmless() {
        let mut device = device();
        device.queue().lock().push(RemoteEvent::Start);
        let report = device.step(Duration::ZERO);
        assert_eq!(report.state, MachineState::Running);
        assert!(report.tick.cues.is_empty());
    }

    #[test]
    fn test_status_line() {
        let mut device = device();
        device.queue().lock().push(RemoteEvent::Start);
        device.step(Duration::from_millis(16 * 60 * 1000));
        let line = device.status_line();
        assert!(line.starts_with("RUNNING | frame 04:00 FINAL | shot "));
    }
}
