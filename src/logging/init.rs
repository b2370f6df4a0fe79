//! Logger initialisation
//!
//! Installs `env_logger` behind the `log` facade, once per process.

use std::io::Write;
use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "speed_snooker=debug").
///
/// `raw_terminal` terminates every record with `\r\n`, needed while the
/// remote listener holds the terminal in raw mode.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directives; `RUST_LOG` when unset
    pub env_filter: Option<String>,
    /// ANSI coloring
    pub write_style: env_logger::WriteStyle,
    /// Emit `\r\n` line endings
    pub raw_terminal: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            raw_terminal: false,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);

        if config.raw_terminal {
            builder.format(|buf, record| {
                write!(
                    buf,
                    "[{} {:<5} {}] {}\r\n",
                    buf.timestamp_seconds(),
                    record.level(),
                    record.target(),
                    record.args()
                )
            });
        }

        // Tests may have installed a logger already.
        let _ = builder.try_init();

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging(LoggingConfig {
            env_filter: Some("speed_snooker=debug".into()),
            ..LoggingConfig::default()
        });
        init_logging(LoggingConfig::default());
        log::debug!("still logging");
    }
}
