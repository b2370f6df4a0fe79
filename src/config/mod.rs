//! Device configuration
//!
//! Frame length, tick rate, shot budgets and tone settings. Every option has a
//! default matching the speed-snooker rules; configurations are validated once,
//! before a [`TimerMachine`](crate::TimerMachine) accepts any event.

use crate::buzzer::ToneSpec;
use crate::{Result, TimerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Longest shot budget accepted, in seconds
pub const MAX_SHOT_SECS: u64 = 60;

/// Allowed frame lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FrameLength {
    /// 30 minute frame
    #[serde(rename = "30m")]
    Minutes30,
    /// 20 minute frame
    #[default]
    #[serde(rename = "20m")]
    Minutes20,
    /// 15 minute frame
    #[serde(rename = "15m")]
    Minutes15,
    /// 5 minutes 30 seconds (practice frame)
    #[serde(rename = "5m30s")]
    Minutes5Secs30,
}

impl FrameLength {
    /// All allowed frame lengths, longest first
    pub const ALL: [FrameLength; 4] = [
        FrameLength::Minutes30,
        FrameLength::Minutes20,
        FrameLength::Minutes15,
        FrameLength::Minutes5Secs30,
    ];

    /// Frame length in whole seconds
    pub fn as_secs(&self) -> u64 {
        match self {
            FrameLength::Minutes30 => 30 * 60,
            FrameLength::Minutes20 => 20 * 60,
            FrameLength::Minutes15 => 15 * 60,
            FrameLength::Minutes5Secs30 => 5 * 60 + 30,
        }
    }

    /// Frame length as a duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.as_secs())
    }

    /// Parse a frame length label (`30m`, `20m`, `15m`, `5m30s`; bare minutes also accepted)
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "30m" | "30" => Some(FrameLength::Minutes30),
            "20m" | "20" => Some(FrameLength::Minutes20),
            "15m" | "15" => Some(FrameLength::Minutes15),
            "5m30s" | "5:30" => Some(FrameLength::Minutes5Secs30),
            _ => None,
        }
    }

    /// Configuration label of the frame length
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameLength::Minutes30 => "30m",
            FrameLength::Minutes20 => "20m",
            FrameLength::Minutes15 => "15m",
            FrameLength::Minutes5Secs30 => "5m30s",
        }
    }
}

impl fmt::Display for FrameLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported polling rates of the tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TickRate {
    /// 15 polls per second
    #[serde(rename = "15hz")]
    Hz15,
    /// 20 polls per second
    #[default]
    #[serde(rename = "20hz")]
    Hz20,
    /// 30 polls per second
    #[serde(rename = "30hz")]
    Hz30,
}

impl TickRate {
    /// Polls per second
    pub fn hz(&self) -> u32 {
        match self {
            TickRate::Hz15 => 15,
            TickRate::Hz20 => 20,
            TickRate::Hz30 => 30,
        }
    }

    /// Interval between two ticks
    pub fn interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.hz() as u64)
    }

    /// Parse a tick rate (`15`, `20hz`, ...)
    pub fn from_str(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        match value.trim_end_matches("hz") {
            "15" => Some(TickRate::Hz15),
            "20" => Some(TickRate::Hz20),
            "30" => Some(TickRate::Hz30),
            _ => None,
        }
    }
}

impl fmt::Display for TickRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hz", self.hz())
    }
}

/// Tone synthesis settings for the software buzzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Play cues at all
    pub enabled: bool,
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Countdown beep (5..1)
    pub short_beep: ToneSpec,
    /// Shot expiry beep
    pub long_beep: ToneSpec,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            enabled: true,
            sample_rate: 44_100,
            short_beep: ToneSpec::new(880.0, 120, 0.6),
            long_beep: ToneSpec::new(880.0, 3000, 0.6),
        }
    }
}

impl AudioConfig {
    /// Validate sample rate and both tones
    pub fn validate(&self) -> Result<()> {
        if !(8_000..=192_000).contains(&self.sample_rate) {
            return Err(TimerError::ConfigError(format!(
                "sample_rate {} Hz outside 8000..=192000",
                self.sample_rate
            )));
        }
        self.short_beep.validate(self.sample_rate)?;
        self.long_beep.validate(self.sample_rate)?;
        Ok(())
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Frame duration
    pub frame_length: FrameLength,
    /// Tick source polling rate
    pub tick_rate: TickRate,
    /// Shot budget outside the final segment
    pub normal_shot_secs: u64,
    /// Shot budget inside the final segment
    pub final_shot_secs: u64,
    /// Remaining frame time at which the final segment begins
    pub final_segment_secs: u64,
    /// Length of the countdown cue window at the end of each shot
    pub beep_window_secs: u64,
    /// Bound of the remote event queue
    pub event_queue_capacity: usize,
    /// Buzzer tones
    pub audio: AudioConfig,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            frame_length: FrameLength::default(),
            tick_rate: TickRate::default(),
            normal_shot_secs: 15,
            final_shot_secs: 10,
            final_segment_secs: 5 * 60,
            beep_window_secs: 5,
            event_queue_capacity: 16,
            audio: AudioConfig::default(),
        }
    }
}

impl TimerConfig {
    /// Default configuration with a different frame length
    pub fn with_frame_length(frame_length: FrameLength) -> Self {
        TimerConfig {
            frame_length,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TimerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_json_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file without validating it
    ///
    /// For callers that adjust the values before a single [`validate`](Self::validate).
    pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            TimerError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every option against its allowed range
    pub fn validate(&self) -> Result<()> {
        for (name, secs) in [
            ("normal_shot_secs", self.normal_shot_secs),
            ("final_shot_secs", self.final_shot_secs),
        ] {
            if !(1..=MAX_SHOT_SECS).contains(&secs) {
                return Err(TimerError::ConfigError(format!(
                    "{name} = {secs} outside 1..={MAX_SHOT_SECS}"
                )));
            }
        }
        if self.final_shot_secs > self.normal_shot_secs {
            return Err(TimerError::ConfigError(format!(
                "final_shot_secs ({}) exceeds normal_shot_secs ({})",
                self.final_shot_secs, self.normal_shot_secs
            )));
        }
        if self.beep_window_secs == 0 || self.beep_window_secs >= self.final_shot_secs {
            return Err(TimerError::ConfigError(format!(
                "beep_window_secs = {} must be at least 1 and below final_shot_secs ({})",
                self.beep_window_secs, self.final_shot_secs
            )));
        }
        if self.final_segment_secs == 0 || self.final_segment_secs >= self.frame_length.as_secs()
        {
            return Err(TimerError::ConfigError(format!(
                "final_segment_secs = {} must be at least 1 and below the {} frame",
                self.final_segment_secs, self.frame_length
            )));
        }
        if self.event_queue_capacity == 0 {
            return Err(TimerError::ConfigError(
                "event_queue_capacity must be at least 1".into(),
            ));
        }
        self.audio.validate()
    }

    /// Shot budget outside the final segment
    pub fn normal_shot(&self) -> Duration {
        Duration::from_secs(self.normal_shot_secs)
    }

    /// Shot budget inside the final segment
    pub fn final_shot(&self) -> Duration {
        Duration::from_secs(self.final_shot_secs)
    }

    /// Final segment threshold
    pub fn final_segment(&self) -> Duration {
        Duration::from_secs(self.final_segment_secs)
    }
}
