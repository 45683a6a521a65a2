//! Logging macros for ergonomic log message formatting.
//!
//! These work with anything exposing the per-level methods, so both
//! [`Logger`](crate::Logger) and [`LogContext`](crate::LogContext) accept
//! them.
//!
//! # Examples
//!
//! ```
//! use simple_log_factory::prelude::*;
//! use simple_log_factory::{fields, info};
//!
//! let registry = LoggerRegistry::new();
//! let logger = LogFactory::new("macros").to_console(false).build_in(&registry)?;
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let generator = LogContextGenerator::new_in(LogFactory::new("macros"), &registry)?;
//! let ctx = generator.get_logger_for_context(fields! { user_id = 42, action = "login" });
//! info!(ctx, "User {} performed action", 42);
//! # Ok::<(), LoggerError>(())
//! ```

/// Build [`ExtraFields`](crate::ExtraFields) from `key = value` pairs.
///
/// # Examples
///
/// ```
/// use simple_log_factory::fields;
///
/// let fields = fields! { request_id = "r1", attempt = 3, retry = false };
/// assert_eq!(fields.len(), 3);
///
/// let empty = fields! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:ident = $value:expr),* $(,)?) => {
        $crate::ExtraFields::new() $(.with(stringify!($key), $value))*
    };
}

/// Log a message at an explicit level with automatic formatting.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use simple_log_factory::prelude::*;
/// # let registry = LoggerRegistry::new();
/// # let logger = LogFactory::new("doc").to_console(false).build_in(&registry).unwrap();
/// use simple_log_factory::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an error-level message flagged as an exception report.
///
/// # Examples
///
/// ```
/// # use simple_log_factory::prelude::*;
/// # let registry = LoggerRegistry::new();
/// # let logger = LogFactory::new("doc").to_console(false).build_in(&registry).unwrap();
/// use simple_log_factory::exception;
/// exception!(logger, "Job {} aborted", 7);
/// ```
#[macro_export]
macro_rules! exception {
    ($logger:expr, $($arg:tt)+) => {
        $logger.exception(format!($($arg)+))
    };
}
