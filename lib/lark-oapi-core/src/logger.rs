//! Pluggable logging sink.
//!
//! The SDK reports through a [`Logger`] rather than calling `tracing`
//! directly, so callers can route messages anywhere. The default
//! [`TracingLogger`] forwards to `tracing` under the `lark_oapi` target.

use std::fmt;
use std::sync::Arc;

use derive_more::Display;

/// Severity of a log message, ordered from least to most severe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum LogLevel {
    /// Debug.
    #[display("debug")]
    Debug,
    /// Info.
    #[default]
    #[display("info")]
    Info,
    /// Warn.
    #[display("warn")]
    Warn,
    /// Error.
    #[display("error")]
    Error,
}

/// Destination for SDK log messages.
pub trait Logger: Send + Sync {
    /// Log at debug level.
    fn debug(&self, message: &str);
    /// Log at info level.
    fn info(&self, message: &str);
    /// Log at warn level.
    fn warn(&self, message: &str);
    /// Log at error level.
    fn error(&self, message: &str);
}

/// [`Logger`] that forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "lark_oapi", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "lark_oapi", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "lark_oapi", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "lark_oapi", "{message}");
    }
}

/// Drops messages below a threshold before handing them to the inner logger.
#[derive(Clone)]
pub struct LoggerProxy {
    level: LogLevel,
    inner: Arc<dyn Logger>,
}

impl LoggerProxy {
    /// Wrap `inner`, keeping messages at `level` or above.
    #[must_use]
    pub fn new(level: LogLevel, inner: Arc<dyn Logger>) -> Self {
        Self { level, inner }
    }

    /// Threshold.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether messages at `level` are emitted.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    /// Log `message` at `level`.
    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        match level {
            LogLevel::Debug => self.inner.debug(message),
            LogLevel::Info => self.inner.info(message),
            LogLevel::Warn => self.inner.warn(message),
            LogLevel::Error => self.inner.error(message),
        }
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log at info level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log at warn level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Log at error level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

impl Default for LoggerProxy {
    fn default() -> Self {
        Self::new(LogLevel::default(), Arc::new(TracingLogger))
    }
}

impl fmt::Debug for LoggerProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerProxy")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}
