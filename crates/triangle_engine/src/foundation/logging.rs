//! Logging utilities
//!
//! Ordinary messages are prefixed with their level and target. Messages on
//! [`DIAGNOSTICS_TARGET`] (shader compile/link failures, fatal bootstrap
//! errors) are written bare so each line starts with its tag, and they stay
//! enabled whatever level is configured.

use std::io::{self, Write};

use log::{LevelFilter, Record};

pub use log::{debug, error, info, trace, warn};

use crate::core::config::EngineSettings;

/// Log target for user-facing diagnostics
pub const DIAGNOSTICS_TARGET: &str = "diagnostics";

/// Initialize the logging system
///
/// The configured level is the baseline; `RUST_LOG` directives refine it.
/// Output goes to stdout so shader diagnostics share the stream with the
/// rest of the program's messages. Calling this twice is harmless.
pub fn init(settings: &EngineSettings) {
    let env_filters = std::env::var("RUST_LOG").ok();
    if builder(settings, env_filters.as_deref()).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

fn builder(settings: &EngineSettings, env_filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(settings.level_filter());
    if let Some(filters) = env_filters {
        builder.parse_filters(filters);
    }
    // Applied last so neither the configured level nor RUST_LOG can mute it
    builder
        .filter_module(DIAGNOSTICS_TARGET, LevelFilter::Error)
        .format(|buf, record| write_record(buf, record))
        .target(env_logger::Target::Stdout);
    builder
}

fn write_record(out: &mut impl Write, record: &Record) -> io::Result<()> {
    if record.target() == DIAGNOSTICS_TARGET {
        writeln!(out, "{}", record.args())
    } else {
        writeln!(out, "[{} {}] {}", record.level(), record.target(), record.args())
    }
}
