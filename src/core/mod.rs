//! Core logger types and traits

pub mod error;
pub mod fields;
pub mod formatter;
pub mod handler;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod registry;

pub use error::{LoggerError, Result};
pub use fields::{ExtraFields, FieldValue};
pub use formatter::{Formatter, LogFormat, TimestampFormat, DEFAULT_LOG_FORMAT};
pub use handler::{Handler, HandlerKind};
pub use log_level::LogLevel;
pub use log_record::{ExceptionInfo, LogRecord};
pub use logger::{Logger, LoggerBackend};
pub use registry::LoggerRegistry;
