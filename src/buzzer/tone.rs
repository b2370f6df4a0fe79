//! Beep tone synthesis
//!
//! Beeps are generated in code, so the device ships no audio files. A tone is
//! a mono sine with a short linear fade at both ends to keep the buzzer from
//! clicking.

use crate::{Result, TimerError};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;

/// Longest fade applied at either end of a tone, in samples
const MAX_FADE_SAMPLES: usize = 200;

/// Pitch, length and loudness of one beep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    /// Sine frequency in Hz
    pub frequency_hz: f32,
    /// Tone length in milliseconds
    pub duration_ms: u32,
    /// Amplitude, 0.0 to 1.0
    pub volume: f32,
}

impl ToneSpec {
    /// Create a tone description
    pub const fn new(frequency_hz: f32, duration_ms: u32, volume: f32) -> Self {
        ToneSpec {
            frequency_hz,
            duration_ms,
            volume,
        }
    }

    /// Reject tones that cannot be rendered at `sample_rate`
    pub fn validate(&self, sample_rate: u32) -> Result<()> {
        let nyquist = sample_rate as f32 / 2.0;
        if !(self.frequency_hz.is_finite() && self.frequency_hz > 0.0 && self.frequency_hz < nyquist)
        {
            return Err(TimerError::ConfigError(format!(
                "tone frequency {} Hz outside (0, {nyquist})",
                self.frequency_hz
            )));
        }
        if self.duration_ms == 0 || self.duration_ms > 10_000 {
            return Err(TimerError::ConfigError(format!(
                "tone duration {} ms outside 1..=10000",
                self.duration_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(TimerError::ConfigError(format!(
                "tone volume {} outside 0.0..=1.0",
                self.volume
            )));
        }
        Ok(())
    }

    /// Number of samples the tone spans at `sample_rate`
    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (sample_rate as u64 * self.duration_ms as u64 / 1000) as usize
    }
}

/// Render `spec` as mono f32 samples in -1.0..=1.0
pub fn render_tone(spec: &ToneSpec, sample_rate: u32) -> Vec<f32> {
    let n_samples = spec.sample_count(sample_rate);
    let amplitude = spec.volume.clamp(0.0, 1.0);
    let step = 2.0 * PI * spec.frequency_hz / sample_rate as f32;
    let fade = MAX_FADE_SAMPLES.min(n_samples / 10);

    (0..n_samples)
        .map(|i| {
            let mut sample = amplitude * (step * i as f32).sin();
            if fade > 0 {
                if i < fade {
                    sample *= i as f32 / fade as f32;
                } else if i > n_samples - fade {
                    sample *= (n_samples - i) as f32 / fade as f32;
                }
            }
            sample
        })
        .collect()
}

/// Write `spec` to a 16-bit mono WAV file
pub fn export_wav<P: AsRef<Path>>(spec: &ToneSpec, sample_rate: u32, path: P) -> Result<()> {
    let samples = render_tone(spec, sample_rate);
    let wav_spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path.as_ref(), wav_spec)
        .map_err(|e| TimerError::AudioFileError(format!("Failed to create WAV file: {}", e)))?;

    for &sample in &samples {
        let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| TimerError::AudioFileError(format!("Failed to write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| TimerError::AudioFileError(format!("Failed to finalize WAV file: {}", e)))?;

    Ok(())
}
