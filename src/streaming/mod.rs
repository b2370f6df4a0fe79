//! Real-time cue playback
//!
//! Enabled by the `streaming` feature.

pub mod audio_device;

pub use audio_device::AudioBuzzer;
