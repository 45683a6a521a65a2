//! Console handler implementation

use crate::core::{Formatter, Handler, HandlerKind, LogLevel, LogRecord, Result, TimestampFormat};
use std::io::Write;

/// Standard stream a console handler writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

pub struct ConsoleHandler {
    target: ConsoleTarget,
    level: LogLevel,
    formatter: Formatter,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self::with_target(ConsoleTarget::Stdout)
    }

    pub fn with_target(target: ConsoleTarget) -> Self {
        Self {
            target,
            level: LogLevel::Debug,
            formatter: Formatter::with_timestamp(TimestampFormat::DateTime),
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Console
    }

    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.formatter.format(record);

        match self.target {
            ConsoleTarget::Stdout => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{}", output)?;
                out.flush()?;
            }
            ConsoleTarget::Stderr => {
                let mut err = std::io::stderr().lock();
                writeln!(err, "{}", output)?;
                err.flush()?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn level(&self) -> LogLevel {
        self.level
    }

    fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    fn set_formatter(&mut self, formatter: Formatter) {
        self.formatter = formatter;
    }

    fn name(&self) -> &str {
        "console"
    }
}
