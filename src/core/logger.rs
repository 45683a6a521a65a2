//! Named logger implementation

use super::{
    fields::ExtraFields,
    handler::{Handler, HandlerKind},
    log_level::LogLevel,
    log_record::{ExceptionInfo, LogRecord},
    error::Result,
};
use parking_lot::RwLock;
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Capabilities the factory and context layers need from a logger
///
/// [`Logger`] is the stock implementation; any other backend can be bound to
/// a [`LogContext`](crate::LogContext) by implementing this trait.
pub trait LoggerBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Deliver a record, subject to the backend's level filtering
    fn emit(&self, record: LogRecord);

    fn is_enabled_for(&self, level: LogLevel) -> bool;

    fn set_min_level(&self, level: LogLevel);

    /// Snapshot of the kinds of the attached handlers
    fn handler_kinds(&self) -> Vec<HandlerKind>;

    fn attach_handler(&self, handler: Box<dyn Handler>);
}

/// A named logger owned by a [`LoggerRegistry`](crate::LoggerRegistry)
///
/// Loggers form a hierarchy by dotted name. A logger with no level of its own
/// uses its nearest ancestor's, and records propagate to ancestors' handlers
/// unless propagation is switched off.
pub struct Logger {
    name: String,
    level: RwLock<Option<LogLevel>>,
    handlers: RwLock<Vec<Box<dyn Handler>>>,
    parent: RwLock<Option<Arc<Logger>>>,
    propagate: AtomicBool,
}

impl Logger {
    pub(crate) fn new(
        name: impl Into<String>,
        level: Option<LogLevel>,
        parent: Option<Arc<Logger>>,
    ) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(level),
            handlers: RwLock::new(Vec::new()),
            parent: RwLock::new(parent),
            propagate: AtomicBool::new(true),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The level set on this logger, if any
    pub fn level(&self) -> Option<LogLevel> {
        *self.level.read()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.level.write() = Some(level);
    }

    /// Own level, else the nearest ancestor's; `Debug` if none is set anywhere
    pub fn effective_level(&self) -> LogLevel {
        if let Some(level) = self.level() {
            return level;
        }
        let mut current = self.parent();
        while let Some(logger) = current {
            if let Some(level) = logger.level() {
                return level;
            }
            current = logger.parent();
        }
        LogLevel::Debug
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.effective_level()
    }

    /// Parent logger; `None` at the top of the hierarchy
    pub fn parent(&self) -> Option<Arc<Logger>> {
        self.parent.read().clone()
    }

    pub(crate) fn set_parent(&self, parent: Arc<Logger>) {
        *self.parent.write() = Some(parent);
    }

    pub fn is_root(&self) -> bool {
        self.parent.read().is_none()
    }

    pub fn propagate(&self) -> bool {
        self.propagate.load(Ordering::Relaxed)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.propagate.store(propagate, Ordering::Relaxed);
    }

    /// Attach a handler unconditionally
    pub fn add_handler(&self, handler: Box<dyn Handler>) {
        self.handlers.write().push(handler);
    }

    /// Attach `handler` unless a handler of the same kind is already attached
    /// here or its kind appears in `inherited`
    ///
    /// The check and the insert happen under one lock on this logger's
    /// handler list. Returns whether the handler was attached.
    pub fn attach_handler_unique(
        &self,
        handler: Box<dyn Handler>,
        inherited: &[HandlerKind],
    ) -> bool {
        let kind = handler.kind();
        if inherited.contains(&kind) {
            return false;
        }

        let mut handlers = self.handlers.write();
        if handlers.iter().any(|h| h.kind() == kind) {
            return false;
        }
        handlers.push(handler);
        true
    }

    pub fn handler_kinds(&self) -> Vec<HandlerKind> {
        self.handlers.read().iter().map(|h| h.kind()).collect()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn has_handlers(&self) -> bool {
        !self.handlers.read().is_empty()
    }

    /// Detach and drop every handler, flushing them on the way out
    pub fn clear_handlers(&self) {
        let drained: Vec<_> = self.handlers.write().drain(..).collect();
        drop(drained);
    }

    /// Hand a record to this logger's handlers, then to ancestors' handlers
    /// while propagation allows
    fn call_handlers(&self, record: &LogRecord) {
        Self::process_sync(&mut self.handlers.write(), record);

        if !self.propagate() {
            return;
        }
        let mut current = self.parent();
        while let Some(logger) = current {
            Self::process_sync(&mut logger.handlers.write(), record);
            if !logger.propagate() {
                break;
            }
            current = logger.parent();
        }
    }

    /// Emit to each handler with per-handler panic isolation
    ///
    /// One failing handler never prevents the others from receiving the
    /// record, and failures never reach the caller.
    fn process_sync(handlers: &mut [Box<dyn Handler>], record: &LogRecord) {
        for (idx, handler) in handlers.iter_mut().enumerate() {
            if record.level < handler.level() {
                continue;
            }

            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler.emit(record)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Handler #{} ({}) failed: {}",
                        idx,
                        handler.name(),
                        e
                    );
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Handler #{} panicked: {}. \
                         Other handlers continue to function.",
                        idx, panic_msg
                    );
                }
            }
        }
    }

    /// Log a prepared record if its level passes this logger's effective level
    pub fn log_record(&self, record: LogRecord) {
        if !self.is_enabled_for(record.level) {
            return;
        }
        self.call_handlers(&record);
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if !self.is_enabled_for(level) {
            return;
        }
        self.call_handlers(&LogRecord::new(level, self.name.as_str(), message));
    }

    /// Log with structured extra fields
    pub fn log_with_fields(&self, level: LogLevel, message: impl AsRef<str>, fields: ExtraFields) {
        if !self.is_enabled_for(level) {
            return;
        }
        let record = LogRecord::new(level, self.name.as_str(), message).with_fields(fields);
        self.call_handlers(&record);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Critical, message);
    }

    /// Log at `Error` with an empty exception payload
    pub fn exception(&self, message: impl AsRef<str>) {
        if !self.is_enabled_for(LogLevel::Error) {
            return;
        }
        let record = LogRecord::new(LogLevel::Error, self.name.as_str(), message)
            .with_exception(ExceptionInfo::none());
        self.call_handlers(&record);
    }

    /// Log at `Error` with `error`'s type, message and cause chain attached
    ///
    /// Pass the concrete error to keep its type name; a `dyn Error` records
    /// only the message and causes.
    pub fn exception_with<E>(&self, message: impl AsRef<str>, error: &E)
    where
        E: Error + ?Sized,
    {
        if !self.is_enabled_for(LogLevel::Error) {
            return;
        }
        let record = LogRecord::new(LogLevel::Error, self.name.as_str(), message)
            .with_exception(ExceptionInfo::capture(error));
        self.call_handlers(&record);
    }

    pub fn flush(&self) -> Result<()> {
        let mut handlers = self.handlers.write();
        for handler in handlers.iter_mut() {
            handler.flush()?;
        }
        Ok(())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handler_kinds())
            .field("parent", &self.parent().map(|p| p.name.clone()))
            .field("propagate", &self.propagate())
            .finish()
    }
}

impl LoggerBackend for Logger {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, record: LogRecord) {
        self.log_record(record);
    }

    fn is_enabled_for(&self, level: LogLevel) -> bool {
        Logger::is_enabled_for(self, level)
    }

    fn set_min_level(&self, level: LogLevel) {
        Logger::set_min_level(self, level);
    }

    fn handler_kinds(&self) -> Vec<HandlerKind> {
        Logger::handler_kinds(self)
    }

    fn attach_handler(&self, handler: Box<dyn Handler>) {
        self.add_handler(handler);
    }
}
