//! stderr logger for the `log` facade
//!
//! Records are written as `[LEVEL] target: message`, one per line. The level
//! comes from `KSIGACTION_LOG` (`off`, `error`, `warn`, `info`, `debug`,
//! `trace`); unset or unparsable values mean `warn`.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable holding the log level
pub const LOG_ENV: &str = "KSIGACTION_LOG";

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

pub struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // One locked write per record so lines from racing threads stay whole
        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        let _ = writeln!(
            out,
            "[{:>5}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Parse a level name, case-insensitively
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

/// Level selected by `KSIGACTION_LOG`
pub fn level_from_env() -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(DEFAULT_LEVEL)
}

/// Install the stderr logger at the level from the environment
pub fn init() -> Result<(), SetLoggerError> {
    init_with_level(level_from_env())
}

/// Install the stderr logger at an explicit level
///
/// Fails if another logger was installed first; the level is left alone then.
pub fn init_with_level(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
