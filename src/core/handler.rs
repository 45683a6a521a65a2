//! Handler trait for log output destinations

use super::{error::Result, formatter::Formatter, log_level::LogLevel, log_record::LogRecord};
use std::fmt;

/// Kind of a handler, the unit of handler deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Console,
    /// Static and daily-rotating files alike
    File,
    Custom(&'static str),
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKind::Console => write!(f, "console"),
            HandlerKind::File => write!(f, "file"),
            HandlerKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

pub trait Handler: Send + Sync {
    fn kind(&self) -> HandlerKind;

    /// Write one record; level filtering has already happened
    fn emit(&mut self, record: &LogRecord) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    fn level(&self) -> LogLevel;

    fn set_level(&mut self, level: LogLevel);

    fn set_formatter(&mut self, formatter: Formatter);

    fn name(&self) -> &str;
}
