//! Command-line argument parsing for the shot timer binary.
//!
//! This module handles:
//! - Configuration file selection
//! - Frame length and tick rate overrides
//! - Audio and tone export switches
//! - Help text generation

use speed_snooker::{FrameLength, TickRate, TimerConfig};
use std::env;

/// Parsed command-line arguments.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    /// JSON configuration file
    pub config_path: Option<String>,
    /// Frame length override
    pub frame_length: Option<FrameLength>,
    /// Tick rate override
    pub tick_rate: Option<TickRate>,
    /// Disable cue playback
    pub no_audio: bool,
    /// Directory to write `short_beep.wav` and `long_beep.wav` into
    pub export_tones: Option<String>,
    /// Print the effective configuration and exit
    pub print_config: bool,
    /// Whether help was requested
    pub show_help: bool,
}

impl CliArgs {
    /// Parse arguments from command line.
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse arguments from an iterator (without the program name).
    pub fn parse_from<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut args = Self::default();
        let mut iter = iter.into_iter();

        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };

            match flag.as_str() {
                "--help" | "-h" => args.show_help = true,
                "--no-audio" => args.no_audio = true,
                "--print-config" => args.print_config = true,
                "--config" | "--frame" | "--tick-rate" | "--export-tones" => {
                    let Some(value) = inline.or_else(|| iter.next()) else {
                        eprintln!("{flag} requires an argument");
                        args.show_help = true;
                        continue;
                    };
                    args.apply_value(&flag, value);
                }
                _ if flag.starts_with('-') => {
                    eprintln!("Unknown flag: {}", arg);
                    args.show_help = true;
                }
                _ => {
                    eprintln!("Unexpected argument: {}", arg);
                    args.show_help = true;
                }
            }
        }

        args
    }

    fn apply_value(&mut self, flag: &str, value: String) {
        match flag {
            "--config" => self.config_path = Some(value),
            "--export-tones" => self.export_tones = Some(value),
            "--frame" => match FrameLength::from_str(&value) {
                Some(length) => self.frame_length = Some(length),
                None => {
                    eprintln!("Unknown frame length: {}", value);
                    self.show_help = true;
                }
            },
            "--tick-rate" => match TickRate::from_str(&value) {
                Some(rate) => self.tick_rate = Some(rate),
                None => {
                    eprintln!("Unsupported tick rate: {}", value);
                    self.show_help = true;
                }
            },
            _ => {}
        }
    }

    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut TimerConfig) {
        if let Some(length) = self.frame_length {
            config.frame_length = length;
        }
        if let Some(rate) = self.tick_rate {
            config.tick_rate = rate;
        }
        if self.no_audio {
            config.audio.enabled = false;
        }
    }

    /// Print help text to stderr.
    pub fn print_help() {
        eprintln!(
            "Usage:\n  speed-snooker [--config <file.json>] [--frame <length>] [--tick-rate <hz>] [--no-audio]\n\n\
             Flags:\n\
             \x20 --config <file>        JSON configuration (missing fields use defaults)\n\
             \x20 --frame <length>       Frame length: 30m, 20m (default), 15m, 5m30s\n\
             \x20 --tick-rate <hz>       Polling rate: 15, 20 (default), 30\n\
             \x20 --no-audio             Log cues instead of playing them\n\
             \x20 --export-tones <dir>   Write short_beep.wav and long_beep.wav and exit\n\
             \x20 --print-config         Print the effective configuration as JSON and exit\n\
             \x20 -h, --help             Show this help\n\n\
             Remote keys:\n\
             \x20 Space/Enter  start/stop      s  start/resume     p  pause\n\
             \x20 r            reset shot      f/Backspace  reset frame\n\
             \x20 1-4          frame 30m/20m/15m/5m30s (idle)     q/Esc  quit\n"
        );
    }
}
