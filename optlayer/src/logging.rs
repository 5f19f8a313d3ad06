//! A stderr backend for the `log` facade.
//!
//! Sources log through `log` when they degrade (a lenient file read that
//! found nothing) and the resolver logs each merge step. Nothing is printed
//! unless a logger is installed, normally by the binary via [`init_logger`].

use std::env;
use std::fmt;
use std::str::FromStr;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Environment variable read by [`select_level`] when neither flag is given.
pub const LOG_MODE_ENV: &str = "OPTLAYER_LOG_MODE";

/// How much diagnostic output reaches stderr.
///
/// Ordered from least to most output.
///
/// ```
/// use optlayer::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Verbose);
/// assert_eq!("Verbose".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Nothing at all.
    Quiet,
    /// Warnings and errors, e.g. a malformed file skipped in lenient mode.
    #[default]
    Normal,
    /// Everything down to debug, including each merge step.
    Verbose,
}

impl LogLevel {
    /// Maps the verbosity onto the `log` crate's maximum level.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Quiet, Self::Normal, Self::Verbose]
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown log mode '{s}' (expected quiet, normal or verbose)"))
    }
}

/// Writes `LEVEL: message` lines to stderr.
#[derive(Debug, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger for the given verbosity.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the verbosity.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns true if a record at `level` would be written.
    ///
    /// ```
    /// use log::Level;
    /// use optlayer::{LogLevel, Logger};
    ///
    /// let logger = Logger::new(LogLevel::Normal);
    /// assert!(logger.shows(Level::Warn));
    /// assert!(!logger.shows(Level::Debug));
    /// ```
    #[must_use]
    pub fn shows(&self, level: Level) -> bool {
        level <= self.level.filter()
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.shows(metadata.level())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{}: {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Picks the verbosity: `--verbose`, then `--quiet`, then
/// [`LOG_MODE_ENV`], then [`LogLevel::Normal`].
///
/// An unparseable environment value is ignored.
#[must_use]
pub fn select_level(verbose: bool, quiet: bool) -> LogLevel {
    match (verbose, quiet) {
        (true, _) => LogLevel::Verbose,
        (false, true) => LogLevel::Quiet,
        (false, false) => env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|mode| mode.parse().ok())
            .unwrap_or_default(),
    }
}

/// Installs a [`Logger`] as the global `log` backend and returns the chosen
/// verbosity.
///
/// The backend can only be installed once per process; a second call keeps
/// the first logger but still moves the global maximum level.
///
/// ```
/// use optlayer::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(false, true), LogLevel::Quiet);
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> LogLevel {
    let level = select_level(verbose, quiet);

    if log::set_boxed_logger(Box::new(Logger::new(level))).is_err() {
        log::debug!("A logger is already installed; only the level changes");
    }
    log::set_max_level(level.filter());

    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Restores `OPTLAYER_LOG_MODE` on drop.
    struct ModeGuard(Option<String>);

    impl ModeGuard {
        fn set(value: Option<&str>) -> Self {
            let saved = env::var(LOG_MODE_ENV).ok();
            match value {
                Some(v) => env::set_var(LOG_MODE_ENV, v),
                None => env::remove_var(LOG_MODE_ENV),
            }
            Self(saved)
        }
    }

    impl Drop for ModeGuard {
        fn drop(&mut self) {
            match &self.0 {
                Some(v) => env::set_var(LOG_MODE_ENV, v),
                None => env::remove_var(LOG_MODE_ENV),
            }
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("QUIET".parse::<LogLevel>().unwrap(), LogLevel::Quiet);
        assert_eq!(" normal ".parse::<LogLevel>().unwrap(), LogLevel::Normal);
        assert!("loud".parse::<LogLevel>().is_err());
        assert!("".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for level in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Verbose] {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_filters() {
        assert_eq!(LogLevel::Quiet.filter(), LevelFilter::Off);
        assert_eq!(LogLevel::default().filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Verbose.filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_logger_thresholds() {
        assert!(!Logger::new(LogLevel::Quiet).shows(Level::Error));

        let normal = Logger::default();
        assert_eq!(normal.level(), LogLevel::Normal);
        assert!(normal.shows(Level::Warn));
        assert!(!normal.shows(Level::Info));

        let verbose = Logger::new(LogLevel::Verbose);
        assert!(verbose.shows(Level::Debug));
        assert!(!verbose.shows(Level::Trace));
    }

    #[test]
    #[serial]
    fn test_flags_beat_environment() {
        let _mode = ModeGuard::set(Some("verbose"));
        assert_eq!(select_level(false, true), LogLevel::Quiet);
        assert_eq!(select_level(true, true), LogLevel::Verbose);
    }

    #[test]
    #[serial]
    fn test_environment_mode() {
        let _mode = ModeGuard::set(Some("quiet"));
        assert_eq!(select_level(false, false), LogLevel::Quiet);
    }

    #[test]
    #[serial]
    fn test_bad_or_missing_environment_mode() {
        {
            let _mode = ModeGuard::set(Some("loud"));
            assert_eq!(select_level(false, false), LogLevel::Normal);
        }
        let _mode = ModeGuard::set(None);
        assert_eq!(select_level(false, false), LogLevel::Normal);
    }
}
