//! Configured log levels and their filtering order.
//!
//! A [`LogLevel`] is the *configured* minimum level of a task logger, as
//! opposed to [`Severity`][crate::protocol::Severity] which is the level of an
//! individual record. The two are related through [`LogLevel::rank`]: a
//! leveled call is emitted when the configured rank is at least the rank of
//! the call.
//!
//! The ladder, from silent to most verbose:
//!
//! `none < error < warn < info == log < debug`
//!
//! `info` and `log` share a rank on purpose: they are filtered together but
//! remain distinct severities in emitted records.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// The minimum level a task logger is configured with.
///
/// # Examples
///
/// ```rust
/// use tasklane_telemetry::LogLevel;
///
/// let level: LogLevel = "warn".parse().unwrap();
/// assert_eq!(level, LogLevel::Warn);
/// assert!(level.rank() < LogLevel::Debug.rank());
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Drop every leveled call.
    None,
    /// Emit `error` calls only.
    Error,
    /// Emit `error` and `warn` calls.
    Warn,
    /// Emit `error`, `warn`, `info` and `log` calls.
    #[default]
    Info,
    /// Same filtering position as [`LogLevel::Info`].
    Log,
    /// Emit everything.
    Debug,
}

impl LogLevel {
    /// Returns the numeric rank used for filtering decisions.
    ///
    /// The rank is fixed for the lifetime of the process; loggers resolve it
    /// once at construction and never look it up again.
    pub const fn rank(self) -> u8 {
        match self {
            LogLevel::None => 0,
            LogLevel::Error => 1,
            LogLevel::Warn => 2,
            LogLevel::Info | LogLevel::Log => 3,
            LogLevel::Debug => 4,
        }
    }

    /// The canonical lowercase name of this level.
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Log => "log",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`LogLevel`] from a string fails.
#[derive(Clone, Debug)]
pub struct ParseLogLevelError(());

impl ParseLogLevelError {
    const MESSAGE: &'static str =
        "unrecognized log level, expected one of: none, error, warn, info, log, debug";
}

impl fmt::Display for ParseLogLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::MESSAGE)
    }
}

impl core::error::Error for ParseLogLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(LogLevel::None),
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "log" => Ok(LogLevel::Log),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(ParseLogLevelError(())),
        }
    }
}
