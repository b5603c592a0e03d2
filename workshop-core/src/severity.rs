use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::CoreError;

/// Log severity attached to every event the service emits.
///
/// Ordered from least to most severe. `Fatal` has no direct counterpart in
/// `tracing`; it is emitted at `ERROR` with a `fatal = true` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// The `tracing` level events of this severity are recorded at.
    pub fn level(&self) -> Level {
        match self {
            Severity::Trace => Level::TRACE,
            Severity::Debug => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warn => Level::WARN,
            Severity::Error | Severity::Fatal => Level::ERROR,
        }
    }

    /// Most verbose filter that still lets this severity through.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.level())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            other => Err(CoreError::ValidationError(format!(
                "unknown severity '{}', expected one of trace, debug, info, warn, error, fatal",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, CoreError> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.as_str().to_string()
    }
}

/// Emit a `tracing` event at a severity chosen at runtime.
///
/// Accepts the same field/message syntax as the `tracing` macros:
///
/// ```
/// use workshop_core::{emit, Severity};
///
/// let severity = Severity::Warn;
/// emit!(severity, product_id = 7, "lookup skipped");
/// ```
#[macro_export]
macro_rules! emit {
    ($severity:expr, $($arg:tt)+) => {
        match $severity {
            $crate::Severity::Trace => $crate::tracing::trace!($($arg)+),
            $crate::Severity::Debug => $crate::tracing::debug!($($arg)+),
            $crate::Severity::Info => $crate::tracing::info!($($arg)+),
            $crate::Severity::Warn => $crate::tracing::warn!($($arg)+),
            $crate::Severity::Error => $crate::tracing::error!($($arg)+),
            $crate::Severity::Fatal => $crate::tracing::error!(fatal = true, $($arg)+),
        }
    };
}
