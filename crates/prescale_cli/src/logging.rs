//! Minimal stderr logger for the `log` facade.

use std::io::{self, Write};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: StderrLogger = StderrLogger;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "[{:<5}] [{}] {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

pub fn initialize(verbosity: u8) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level_for(verbosity));
    Ok(())
}
