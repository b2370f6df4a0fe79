//! Audio device integration using rodio
//!
//! Plays pre-rendered beep tones on the system audio device. Each cue appends
//! one tone source to the sink and returns at once.

use crate::buzzer::{render_tone, CueSink};
use crate::config::AudioConfig;
use crate::machine::Cue;
use crate::{Result, TimerError};
use rodio::{OutputStream, Sink, Source};
use std::sync::Arc;
use std::time::Duration;

/// Audio source replaying one rendered tone
struct ToneSource {
    samples: Arc<[f32]>,
    pos: usize,
    sample_rate: u32,
}

impl ToneSource {
    fn new(samples: Arc<[f32]>, sample_rate: u32) -> Self {
        ToneSource {
            samples,
            pos: 0,
            sample_rate,
        }
    }
}

impl Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.samples.len() - self.pos)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        let nanos = self.samples.len() as u64 * 1_000_000_000 / self.sample_rate as u64;
        Some(Duration::from_nanos(nanos))
    }
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.samples.get(self.pos).copied()?;
        self.pos += 1;
        Some(sample)
    }
}

/// Buzzer playing cues through the default audio output
pub struct AudioBuzzer {
    _stream: OutputStream,
    sink: Sink,
    short_beep: Arc<[f32]>,
    long_beep: Arc<[f32]>,
    sample_rate: u32,
}

impl AudioBuzzer {
    /// Open the default output device and render both tones
    pub fn new(config: &AudioConfig) -> Result<Self> {
        config.validate()?;

        let (stream, stream_handle) = OutputStream::try_default().map_err(|e| {
            TimerError::AudioDeviceError(format!("Failed to create audio stream: {}", e))
        })?;

        let sink = Sink::try_new(&stream_handle).map_err(|e| {
            TimerError::AudioDeviceError(format!("Failed to create audio sink: {}", e))
        })?;

        Ok(AudioBuzzer {
            _stream: stream,
            sink,
            short_beep: render_tone(&config.short_beep, config.sample_rate).into(),
            long_beep: render_tone(&config.long_beep, config.sample_rate).into(),
            sample_rate: config.sample_rate,
        })
    }

    /// Tones queued or playing
    pub fn pending(&self) -> usize {
        self.sink.len()
    }
}

impl CueSink for AudioBuzzer {
    fn play_cue(&mut self, cue: Cue) {
        let samples = match cue {
            Cue::ShortBeep => Arc::clone(&self.short_beep),
            Cue::LongBeep => Arc::clone(&self.long_beep),
        };
        self.sink.append(ToneSource::new(samples, self.sample_rate));
    }

    fn wait_for_finish(&mut self) {
        self.sink.sleep_until_end();
    }
}

impl Drop for AudioBuzzer {
    fn drop(&mut self) {
        self.sink.stop();
    }
}
