//! Logger factory: pre-configured console and file logging in one call
//!
//! # Example
//!
//! ```no_run
//! use simple_log_factory::prelude::*;
//!
//! let logger = LogFactory::new("svc")
//!     .log_file("/tmp/svc.log")
//!     .log_level(LogLevel::Info)
//!     .unique_handler_types(true)
//!     .build()?;
//!
//! logger.info("service started");
//! # Ok::<(), LoggerError>(())
//! ```

use crate::core::error::validate_log_name;
use crate::core::{
    Formatter, Handler, HandlerKind, LogFormat, LogLevel, Logger, LoggerRegistry, Result,
    TimestampFormat,
};
use crate::handlers::{ConsoleHandler, ConsoleTarget, FileHandler, RotatingFileHandler, RotationPolicy};
use std::path::PathBuf;
use std::sync::Arc;

/// Build (or fetch) the logger `log_name` from the process-wide registry
/// with default options: console output only, level `Debug`.
///
/// # Errors
///
/// [`LoggerError::InvalidArgument`](crate::LoggerError::InvalidArgument)
/// if `log_name` is empty or whitespace.
pub fn log_factory(log_name: &str) -> Result<Arc<Logger>> {
    LogFactory::new(log_name).build()
}

/// Options for building a logger
///
/// Building is not idempotent: each build of the same name attaches a fresh
/// set of handlers unless [`unique_handler_types`](Self::unique_handler_types)
/// is enabled.
pub struct LogFactory {
    log_name: String,
    log_file: Option<PathBuf>,
    rotate_file_by_day: bool,
    log_level: LogLevel,
    to_console: bool,
    console_target: ConsoleTarget,
    custom_handlers: Vec<Box<dyn Handler>>,
    log_format: Option<String>,
    log_time_format: Option<String>,
    unique_handler_types: bool,
    rotation: RotationPolicy,
    use_colors: bool,
}

impl LogFactory {
    pub fn new(log_name: impl Into<String>) -> Self {
        Self {
            log_name: log_name.into(),
            log_file: None,
            rotate_file_by_day: true,
            log_level: LogLevel::Debug,
            to_console: true,
            console_target: ConsoleTarget::Stdout,
            custom_handlers: Vec::new(),
            log_format: None,
            log_time_format: None,
            unique_handler_types: false,
            rotation: RotationPolicy::default(),
            use_colors: false,
        }
    }

    pub fn log_name(&self) -> &str {
        &self.log_name
    }

    /// Also log to `path`
    #[must_use = "builder methods return a new value"]
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Rotate the log file at local midnight (default `true`)
    ///
    /// Only takes effect together with [`log_file`](Self::log_file).
    #[must_use = "builder methods return a new value"]
    pub fn rotate_file_by_day(mut self, rotate: bool) -> Self {
        self.rotate_file_by_day = rotate;
        self
    }

    /// Minimum level for the logger and its handlers (default `Debug`)
    #[must_use = "builder methods return a new value"]
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Attach a console handler (default `true`)
    #[must_use = "builder methods return a new value"]
    pub fn to_console(mut self, enabled: bool) -> Self {
        self.to_console = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_target(mut self, target: ConsoleTarget) -> Self {
        self.console_target = target;
        self
    }

    /// Attach an extra handler after the built-in ones
    #[must_use = "builder methods return a new value"]
    pub fn custom_handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.custom_handlers.push(Box::new(handler));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn custom_handlers<I>(mut self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Handler>>,
    {
        self.custom_handlers.extend(handlers);
        self
    }

    /// Line template, see [`LogFormat`]
    #[must_use = "builder methods return a new value"]
    pub fn log_format(mut self, template: impl Into<String>) -> Self {
        self.log_format = Some(template.into());
        self
    }

    /// strftime pattern for the timestamp column
    ///
    /// Daily-rotated files ignore it and always use `%H:%M:%S`.
    #[must_use = "builder methods return a new value"]
    pub fn log_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.log_time_format = Some(pattern.into());
        self
    }

    /// Attach at most one handler of each kind (default `false`)
    #[must_use = "builder methods return a new value"]
    pub fn unique_handler_types(mut self, unique: bool) -> Self {
        self.unique_handler_types = unique;
        self
    }

    /// Number of dated files a rotating handler keeps; `0` keeps all
    #[must_use = "builder methods return a new value"]
    pub fn max_backups(mut self, count: usize) -> Self {
        self.rotation = self.rotation.with_max_backups(count);
        self
    }

    /// Gzip rotated files
    #[must_use = "builder methods return a new value"]
    pub fn compress_rotated(mut self, enabled: bool) -> Self {
        self.rotation = self.rotation.with_compression(enabled);
        self
    }

    /// Colour the console level column
    #[must_use = "builder methods return a new value"]
    pub fn use_colors(mut self, enabled: bool) -> Self {
        self.use_colors = enabled;
        self
    }

    /// Build against the process-wide registry
    pub fn build(self) -> Result<Arc<Logger>> {
        self.build_in(LoggerRegistry::global())
    }

    /// Build against an explicit registry
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty name, a bad format template or a bad
    /// time format, raised before anything is attached. File open failures are returned as
    /// `LoggerError::Io`.
    pub fn build_in(self, registry: &LoggerRegistry) -> Result<Arc<Logger>> {
        validate_log_name(&self.log_name)?;

        let log_format = match self.log_format {
            Some(ref template) => LogFormat::parse(template)?,
            None => LogFormat::default(),
        };
        let timestamp = match self.log_time_format {
            Some(ref pattern) => TimestampFormat::custom(pattern.as_str())?,
            None => TimestampFormat::DateTime,
        };
        let plain = Formatter::new(log_format.clone(), timestamp);

        let mut handlers: Vec<Box<dyn Handler>> = Vec::new();

        if self.to_console {
            let mut console = ConsoleHandler::with_target(self.console_target);
            console.set_formatter(plain.clone().with_colors(self.use_colors));
            handlers.push(Box::new(console));
        }

        if let Some(ref path) = self.log_file {
            if self.rotate_file_by_day {
                let mut file = RotatingFileHandler::with_policy(path, self.rotation.clone())?;
                file.set_formatter(Formatter::new(log_format.clone(), TimestampFormat::TimeOnly));
                handlers.push(Box::new(file));
            } else {
                let mut file = FileHandler::new(path)?;
                file.set_formatter(plain.clone());
                handlers.push(Box::new(file));
            }
        }

        for mut custom in self.custom_handlers {
            custom.set_formatter(plain.clone());
            handlers.push(custom);
        }

        let logger = registry.get_logger(&self.log_name);
        logger.set_min_level(self.log_level);

        let inherited: Vec<HandlerKind> = if self.unique_handler_types {
            logger.parent().map(|p| p.handler_kinds()).unwrap_or_default()
        } else {
            Vec::new()
        };

        for mut handler in handlers {
            handler.set_level(self.log_level);
            if self.unique_handler_types {
                logger.attach_handler_unique(handler, &inherited);
            } else {
                logger.add_handler(handler);
            }
        }

        Ok(logger)
    }
}
