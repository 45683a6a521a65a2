//! # Simple Log Factory
//!
//! Pre-configured loggers in one call: console output, optional static or
//! daily-rotating file output, handler deduplication, and context values that
//! attach fixed key-value fields to every record.
//!
//! ## Features
//!
//! - **One-call setup**: [`log_factory`] / [`LogFactory`] wire console and file handlers
//! - **Daily rotation**: files roll over at local midnight into `<path>.YYYY-MM-DD`
//! - **Deduplication**: optionally attach at most one handler of each kind
//! - **Bound context**: [`LogContextGenerator`] hands out [`LogContext`] values with fixed fields
//! - **Injectable registry**: [`LoggerRegistry`] instead of hidden global state
//!
//! ```no_run
//! use simple_log_factory::prelude::*;
//! use simple_log_factory::fields;
//!
//! let logger = log_factory("svc")?;
//! logger.info("hello");
//!
//! let generator = LogContextGenerator::new(LogFactory::new("svc"))?;
//! let ctx = generator.get_logger_for_context(fields! { request_id = "r1" });
//! ctx.info("hi");
//! # Ok::<(), LoggerError>(())
//! ```

pub mod context;
pub mod core;
pub mod factory;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::context::{LogContext, LogContextGenerator};
    pub use crate::core::{
        ExceptionInfo, ExtraFields, FieldValue, Formatter, Handler, HandlerKind, LogFormat,
        LogLevel, LogRecord, Logger, LoggerBackend, LoggerError, LoggerRegistry, Result,
        TimestampFormat,
    };
    pub use crate::factory::{log_factory, LogFactory};
    pub use crate::handlers::{
        ConsoleHandler, ConsoleTarget, FileHandler, MemoryHandler, RotatingFileHandler,
        RotationPolicy,
    };
}

pub use context::{LogContext, LogContextGenerator};
pub use crate::core::{
    ExceptionInfo, ExtraFields, FieldValue, Formatter, Handler, HandlerKind, LogFormat, LogLevel,
    LogRecord, Logger, LoggerBackend, LoggerError, LoggerRegistry, Result, TimestampFormat,
};
pub use factory::{log_factory, LogFactory};
pub use handlers::{ConsoleHandler, ConsoleTarget, FileHandler, MemoryHandler, RotatingFileHandler};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
