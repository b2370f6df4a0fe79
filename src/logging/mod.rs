//! Logging
//!
//! Logger initialisation for the device binary. Library code only uses the
//! `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
