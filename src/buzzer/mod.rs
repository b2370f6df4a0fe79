//! Buzzer Output
//!
//! The state machine only requests cues; a [`CueSink`] decides how they sound.
//! Sinks are fire-and-forget: `play_cue` must return without waiting for the
//! tone to finish.

pub mod tone;

pub use tone::{export_wav, render_tone, ToneSpec};

use crate::machine::Cue;

/// Receiver of cue requests
pub trait CueSink {
    /// Start playing `cue` and return immediately
    fn play_cue(&mut self, cue: Cue);

    /// The frame ended; default does nothing
    fn frame_over(&mut self) {}

    /// Block until every requested cue has sounded; default returns at once
    fn wait_for_finish(&mut self) {}
}

impl<S: CueSink + ?Sized> CueSink for Box<S> {
    fn play_cue(&mut self, cue: Cue) {
        (**self).play_cue(cue);
    }

    fn frame_over(&mut self) {
        (**self).frame_over();
    }

    fn wait_for_finish(&mut self) {
        (**self).wait_for_finish();
    }
}

/// Sink for devices without audio output: cues only go to the log
#[derive(Debug, Default, Clone)]
pub struct LogBuzzer {
    played: usize,
}

impl LogBuzzer {
    /// Create a log-only buzzer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cues received so far
    pub fn played(&self) -> usize {
        self.played
    }
}

impl CueSink for LogBuzzer {
    fn play_cue(&mut self, cue: Cue) {
        self.played += 1;
        log::info!("cue: {cue}");
    }

    fn frame_over(&mut self) {
        log::info!("cue: frame over");
    }
}
