//! Speed Snooker Shot Timer
//!
//! Device program for the table: reads remote buttons from the keyboard
//! (Bluetooth fobs and IR receivers present as keyboards), drives the shot and
//! frame clocks at the configured tick rate and plays the countdown cues.

mod args;

use anyhow::{Context, Result};
use args::CliArgs;
use speed_snooker::logging::{init_logging, LoggingConfig};
use speed_snooker::remote::KeyboardListener;
use speed_snooker::{
    buzzer, format_clock, CueSink, Device, EventQueue, Keymap, LogBuzzer, TimerConfig,
    TimerMachine,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn load_config(args: &CliArgs) -> Result<TimerConfig> {
    let mut config = match &args.config_path {
        Some(path) => TimerConfig::read_json_file(path)
            .with_context(|| format!("loading configuration from '{path}'"))?,
        None => TimerConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate().context("validating configuration")?;
    Ok(config)
}

fn export_tones(config: &TimerConfig, dir: &str) -> Result<()> {
    let dir = Path::new(dir);
    std::fs::create_dir_all(dir).with_context(|| format!("creating '{}'", dir.display()))?;

    let audio = &config.audio;
    for (name, tone) in [
        ("short_beep.wav", &audio.short_beep),
        ("long_beep.wav", &audio.long_beep),
    ] {
        let path = dir.join(name);
        buzzer::export_wav(tone, audio.sample_rate, &path)
            .with_context(|| format!("exporting '{}'", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

#[cfg(feature = "streaming")]
fn build_sink(config: &TimerConfig) -> Box<dyn CueSink> {
    if !config.audio.enabled {
        log::info!("audio disabled, cues are logged only");
        return Box::new(LogBuzzer::new());
    }
    match speed_snooker::AudioBuzzer::new(&config.audio) {
        Ok(buzzer) => Box::new(buzzer),
        Err(e) => {
            log::warn!("{e}; falling back to logged cues");
            Box::new(LogBuzzer::new())
        }
    }
}

#[cfg(not(feature = "streaming"))]
fn build_sink(config: &TimerConfig) -> Box<dyn CueSink> {
    if config.audio.enabled {
        log::warn!("built without the \"streaming\" feature; cues are logged only");
    }
    Box::new(LogBuzzer::new())
}

fn run(config: TimerConfig) -> Result<()> {
    let queue = EventQueue::shared(config.event_queue_capacity);
    let machine = TimerMachine::new(config.clone()).context("building timer")?;
    let sink = build_sink(&config);
    let mut device = Device::new(machine, Arc::clone(&queue), sink);

    let mut listener =
        KeyboardListener::spawn(queue, Keymap::new()).context("starting remote listener")?;

    log::info!(
        "frame {} ({}), shots {}s/{}s, final segment {}, tick {}",
        config.frame_length,
        format_clock(config.frame_length.as_secs()),
        config.normal_shot_secs,
        config.final_shot_secs,
        format_clock(config.final_segment_secs),
        config.tick_rate
    );
    log::info!("keys: [space]=start/stop [r]=reset shot [f]=reset frame [1-4]=frame length [q]=quit");

    let interval = config.tick_rate.interval();
    let mut last = Instant::now();
    while !listener.quit_requested() {
        std::thread::sleep(interval);
        let now = Instant::now();
        device.step(now.duration_since(last));
        last = now;
    }

    listener.stop();
    log::info!("{}", device.status_line());
    device.finish();
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    if args.show_help {
        CliArgs::print_help();
        return Ok(());
    }

    let config = load_config(&args)?;

    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    if let Some(dir) = &args.export_tones {
        return export_tones(&config, dir);
    }

    init_logging(LoggingConfig {
        raw_terminal: true,
        ..LoggingConfig::default()
    });

    run(config)
}
