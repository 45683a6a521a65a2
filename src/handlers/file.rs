//! Static (non-rotating) file handler

use crate::core::{Formatter, Handler, HandlerKind, LogLevel, LogRecord, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends every record to one file that grows without bound
pub struct FileHandler {
    path: PathBuf,
    file: Option<File>,
    level: LogLevel,
    formatter: Formatter,
}

impl FileHandler {
    /// Open (or create) `path` in append mode
    ///
    /// Open failures are returned as [`LoggerError::Io`] unchanged; a missing
    /// parent directory is not created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            file: Some(file),
            level: LogLevel::Debug,
            formatter: Formatter::default(),
        })
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }
}

impl Handler for FileHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::File
    }

    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::other("File handler is closed"))?;

        let mut output = self.formatter.format(record);
        output.push('\n');

        // Unbuffered: each record reaches the file before emit returns
        file.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            file.flush()?;
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
        "file"
    }
}

impl Drop for FileHandler {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
