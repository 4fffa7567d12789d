//! Logger setup and a logging scan observer.

use std::io::Write;

use env_logger::{fmt::Formatter, Builder, Target};
use log::{Level, LevelFilter};

use crate::error::{Error, Result};
use crate::local_search::ScanObserver;

/// Installs an `env_logger` writing compact lines to stderr.
///
/// `RUST_LOG` is not consulted; `level` is authoritative.
pub fn init_logger(level: LevelFilter, timestamp: bool) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(move |buf: &mut Formatter, record| {
            if timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(buf, "{} {}", level_tag(record.level()), record.args())
        });

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// Reports each scan as `"{scan}: {length}"` through the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    level: Level,
}

impl LogObserver {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl ScanObserver for LogObserver {
    fn on_scan(&mut self, scan: usize, length: f64) {
        log::log!(self.level, "{scan}: {length:.6}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_tags() {
        assert_eq!(level_tag(Level::Warn), "WARN");
        assert_eq!(level_tag(Level::Trace), "TRACE");
    }
}
