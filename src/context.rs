//! Context-bound logging
//!
//! A [`LogContextGenerator`] builds its logger once and hands out
//! [`LogContext`] values, each carrying a fixed set of extra fields that is
//! attached to every record it logs.
//!
//! # Example
//!
//! ```
//! use simple_log_factory::prelude::*;
//! use simple_log_factory::fields;
//!
//! let registry = LoggerRegistry::new();
//! let generator = LogContextGenerator::new_in(LogFactory::new("svc"), &registry)?;
//!
//! let ctx = generator.get_logger_for_context(fields! { request_id = "r1" });
//! ctx.info("handling request");
//! # Ok::<(), LoggerError>(())
//! ```

use crate::core::{
    ExceptionInfo, ExtraFields, LogLevel, LogRecord, Logger, LoggerBackend, LoggerRegistry,
    Result,
};
use crate::factory::LogFactory;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Produces [`LogContext`] values bound to one logger
#[derive(Debug, Clone)]
pub struct LogContextGenerator {
    logger: Arc<Logger>,
}

impl LogContextGenerator {
    /// Build the logger from `factory` in the process-wide registry
    pub fn new(factory: LogFactory) -> Result<Self> {
        Self::new_in(factory, LoggerRegistry::global())
    }

    /// Build the logger from `factory` in `registry`
    ///
    /// The name is validated and the handlers are attached here, once;
    /// producing contexts afterwards never fails and never attaches handlers.
    pub fn new_in(factory: LogFactory, registry: &LoggerRegistry) -> Result<Self> {
        let logger = factory.build_in(registry)?;
        Ok(Self { logger })
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// New context carrying `fields` on every call
    pub fn get_logger_for_context(&self, fields: ExtraFields) -> LogContext {
        LogContext::new(self.logger.clone(), fields)
    }

    /// Alias of [`get_logger_for_context`](Self::get_logger_for_context)
    pub fn get_context(&self, fields: ExtraFields) -> LogContext {
        self.get_logger_for_context(fields)
    }
}

/// A logger with a fixed set of extra fields
///
/// Immutable after construction; cloning shares the same fields.
#[derive(Clone)]
pub struct LogContext {
    logger: Arc<dyn LoggerBackend>,
    fields: Arc<ExtraFields>,
}

impl LogContext {
    pub fn new(logger: Arc<dyn LoggerBackend>, fields: ExtraFields) -> Self {
        Self {
            logger,
            fields: Arc::new(fields),
        }
    }

    pub fn fields(&self) -> &ExtraFields {
        &self.fields
    }

    pub fn logger_name(&self) -> &str {
        self.logger.name()
    }

    fn emit(&self, level: LogLevel, message: &str, exception: Option<ExceptionInfo>) {
        if !self.logger.is_enabled_for(level) {
            return;
        }
        let mut record =
            LogRecord::new(level, self.logger.name(), message).with_fields((*self.fields).clone());
        record.exception = exception;
        self.logger.emit(record);
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.emit(level, message.as_ref(), None);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Debug, message.as_ref(), None);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Info, message.as_ref(), None);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Warning, message.as_ref(), None);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Error, message.as_ref(), None);
    }

    pub fn critical(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Critical, message.as_ref(), None);
    }

    /// Log at `Error` with an empty exception payload
    pub fn exception(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Error, message.as_ref(), Some(ExceptionInfo::none()));
    }

    /// Log at `Error` with `error`'s details attached
    ///
    /// Pass the concrete error to keep its type name; a `dyn Error` records
    /// only the message and causes.
    pub fn exception_with<E>(&self, message: impl AsRef<str>, error: &E)
    where
        E: Error + ?Sized,
    {
        self.emit(
            LogLevel::Error,
            message.as_ref(),
            Some(ExceptionInfo::capture(error)),
        );
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext")
            .field("logger", &self.logger.name())
            .field("fields", &self.fields)
            .finish()
    }
}
