//! Speed Snooker Shot Timer
//!
//! The shot and frame clock of a speed-snooker table device. A frame runs for a
//! fixed length (30, 20, 15 minutes or 5:30); every shot inside it is bounded by
//! a short countdown of 15 seconds, dropping to 10 seconds in the last five
//! minutes of the frame. The last five seconds of every shot are announced with
//! short beeps and expiry with a long one.
//!
//! # Features
//! - Deterministic timer state machine driven by explicit ticks
//! - Cue emission that never skips a second, whatever the tick granularity
//! - Bounded remote event queue drained once per tick
//! - Keyboard-style remote input (Bluetooth fobs presenting as keyboards)
//! - Software buzzer: sine beep synthesis, WAV export, optional playback
//!
//! # Crate feature flags
//! - `streaming` (opt-in): real-time cue playback through `rodio` (`AudioBuzzer`)
//!
//! # Quick start
//! ```
//! use std::time::Duration;
//! use speed_snooker::{Cue, RemoteEvent, TimerConfig, TimerMachine};
//!
//! let mut machine = TimerMachine::new(TimerConfig::default()).unwrap();
//! machine.handle_event(RemoteEvent::Start).unwrap();
//!
//! let mut cues = Vec::new();
//! for _ in 0..15 {
//!     let report = machine.tick(Duration::from_secs(1)).unwrap();
//!     cues.extend(report.cues);
//! }
//! assert_eq!(cues.last(), Some(&Cue::LongBeep));
//! ```

#![warn(missing_docs)]

pub mod buzzer; // Cue sinks and tone synthesis
pub mod clock; // Frame and shot clocks
pub mod config; // Device configuration
pub mod device; // Tick-driven device loop
pub mod logging; // Logger initialisation
pub mod machine; // Shot/frame timer state machine
pub mod remote; // Remote input and event queue
#[cfg(feature = "streaming")]
pub mod streaming; // Audio Output

/// Error types for shot timer operations
#[derive(thiserror::Error, Debug)]
pub enum TimerError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Configuration file could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// IO error from filesystem or terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error writing audio file
    #[error("Audio file write error: {0}")]
    AudioFileError(String),

    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    /// Remote input error
    #[error("Input error: {0}")]
    InputError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for TimerError {
    /// Converts a String into `TimerError::Other`.
    ///
    /// Prefer the explicit variants (`ConfigError`, `AudioFileError`, ...) where
    /// the failure has a known category.
    fn from(msg: String) -> Self {
        TimerError::Other(msg)
    }
}

impl From<&str> for TimerError {
    /// Converts a string slice into `TimerError::Other`.
    fn from(msg: &str) -> Self {
        TimerError::Other(msg.to_string())
    }
}

/// Result type for timer operations
pub type Result<T> = std::result::Result<T, TimerError>;

// Public API exports
pub use buzzer::{CueSink, LogBuzzer, ToneSpec};
pub use clock::{FrameClock, ShotClock, ShotState};
pub use config::{AudioConfig, FrameLength, TickRate, TimerConfig};
pub use device::{format_clock, Device, StepReport};
pub use machine::{Cue, Ignored, MachineState, RemoteEvent, TickReport, TimerMachine};
pub use remote::{EventQueue, Input, Keymap, SharedQueue};
#[cfg(feature = "streaming")]
pub use streaming::AudioBuzzer;
