//! In-memory handler that keeps records for later inspection
//!
//! Useful for tests and for processors that want the structured record
//! (including its extra fields) rather than a formatted line.

use crate::core::{Formatter, Handler, HandlerKind, LogLevel, LogRecord, Result};
use parking_lot::Mutex;
use std::sync::Arc;

pub struct MemoryHandler {
    records: Arc<Mutex<Vec<LogRecord>>>,
    lines: Arc<Mutex<Vec<String>>>,
    level: LogLevel,
    formatter: Formatter,
}

/// Shared read side of a [`MemoryHandler`], usable after the handler has been
/// moved into a logger
#[derive(Clone)]
pub struct MemoryBuffer {
    records: Arc<Mutex<Vec<LogRecord>>>,
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            lines: Arc::new(Mutex::new(Vec::new())),
            level: LogLevel::Debug,
            formatter: Formatter::default(),
        }
    }

    pub fn buffer(&self) -> MemoryBuffer {
        MemoryBuffer {
            records: Arc::clone(&self.records),
            lines: Arc::clone(&self.lines),
        }
    }
}

impl Default for MemoryHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBuffer {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Records as formatted by the handler's formatter
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
        self.lines.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Custom("memory")
    }

    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.formatter.format(record);
        self.lines.lock().push(line);
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
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
        "memory"
    }
}
