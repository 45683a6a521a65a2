//! Daily rotating file handler
//!
//! The live file always sits at the configured path. When the first record
//! after local midnight arrives, the live file is renamed to
//! `<path>.<YYYY-MM-DD>` (the day its content belongs to) and a fresh file is
//! opened at the original path. Because the date lives in the rotated file
//! name, records are written with a time-only timestamp.

use crate::core::{
    Formatter, Handler, HandlerKind, LogLevel, LogRecord, LoggerError, Result, TimestampFormat,
};
use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffix appended to rotated files, e.g. `app.log.2025-01-08`
pub const ROTATED_SUFFIX_FORMAT: &str = "%Y-%m-%d";

/// What to do with files that have been rotated out
///
/// # Examples
///
/// ```
/// use simple_log_factory::handlers::RotationPolicy;
///
/// // Keep two weeks of compressed history
/// let policy = RotationPolicy::new()
///     .with_max_backups(14)
///     .with_compression(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Maximum number of dated files to keep; `0` keeps all of them
    pub max_backup_files: usize,
    /// Whether to gzip rotated files
    pub compress: bool,
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backup_files = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

/// First local midnight strictly after `t`
///
/// Where a DST gap swallows midnight the rollover moves to 01:00 that day.
fn next_midnight<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    let zone = t.timezone();
    let tomorrow = t
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap_or(NaiveDate::MAX);

    [0, 1]
        .into_iter()
        .filter_map(|hour| tomorrow.and_hms_opt(hour, 0, 0))
        .find_map(|start| zone.from_local_datetime(&start).earliest())
        .unwrap_or_else(|| t.clone() + chrono::Duration::days(1))
}

/// Rotates at local midnight and writes time-only timestamps
pub struct RotatingFileHandler {
    base_path: PathBuf,
    policy: RotationPolicy,
    file: Option<File>,
    rollover_at: DateTime<Local>,
    level: LogLevel,
    formatter: Formatter,
}

impl RotatingFileHandler {
    /// Open `path` for daily rotation with the default policy
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Io`] if the file cannot be created or opened
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// Open `path` for daily rotation with a custom policy
    ///
    /// An existing file is rolled over at the first midnight after its last
    /// modification, so content left from a previous day is rotated on the
    /// next write.
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&base_path)?;

        let last_write: DateTime<Local> = file
            .metadata()
            .and_then(|m| m.modified())
            .map(DateTime::from)
            .unwrap_or_else(|_| Local::now());

        Ok(Self {
            base_path,
            policy,
            file: Some(file),
            rollover_at: next_midnight(&last_write),
            level: LogLevel::Debug,
            formatter: Formatter::with_timestamp(TimestampFormat::TimeOnly),
        })
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Instant at which the next record triggers a rollover
    #[must_use]
    pub fn rollover_at(&self) -> DateTime<Local> {
        self.rollover_at
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Path a file holding `day`'s records is renamed to
    #[must_use]
    pub fn dated_path(&self, day: NaiveDate) -> PathBuf {
        let mut name = self.base_file_name();
        name.push('.');
        name.push_str(&day.format(ROTATED_SUFFIX_FORMAT).to_string());
        self.base_path.with_file_name(name)
    }

    fn base_file_name(&self) -> String {
        self.base_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log")
            .to_string()
    }

    fn should_rollover(&self, now: &DateTime<Local>) -> bool {
        *now >= self.rollover_at
    }

    /// Move the live file aside under its date and reopen the base path
    fn rollover(&mut self, now: &DateTime<Local>) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        // The live file holds the day that ended at the pending rollover instant
        let content_day = self
            .rollover_at
            .date_naive()
            .checked_sub_days(Days::new(1))
            .unwrap_or(NaiveDate::MIN);
        let dated = self.dated_path(content_day);

        if dated.exists() {
            fs::remove_file(&dated).map_err(|e| {
                LoggerError::file_rotation(
                    dated.display().to_string(),
                    format!("Failed to replace existing rotated file: {}", e),
                )
            })?;
        }

        if self.base_path.exists() {
            fs::rename(&self.base_path, &dated).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;

            if self.policy.compress {
                self.compress_file(&dated)?;
            }
        }

        if self.policy.max_backup_files > 0 {
            self.prune_backups();
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.base_path)
            .map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to create new log file: {}", e),
                )
            })?;

        self.file = Some(file);
        self.rollover_at = next_midnight(now);
        Ok(())
    }

    /// Rotated files next to the live file, oldest first
    pub fn rotated_files(&self) -> Vec<PathBuf> {
        let dir = match self.base_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let prefix = format!("{}.", self.base_file_name());

        let mut dated: Vec<(NaiveDate, PathBuf)> = match fs::read_dir(&dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| {
                    let name = entry.file_name().into_string().ok()?;
                    let suffix = name.strip_prefix(&prefix)?;
                    let date_part = suffix.strip_suffix(".gz").unwrap_or(suffix);
                    let day = NaiveDate::parse_from_str(date_part, ROTATED_SUFFIX_FORMAT).ok()?;
                    Some((day, entry.path()))
                })
                .collect(),
            Err(_) => Vec::new(),
        };

        dated.sort();
        dated.into_iter().map(|(_, path)| path).collect()
    }

    fn prune_backups(&self) {
        let rotated = self.rotated_files();
        let excess = rotated.len().saturating_sub(self.policy.max_backup_files);

        for old in rotated.into_iter().take(excess) {
            if let Err(e) = fs::remove_file(&old) {
                eprintln!(
                    "[LOGGER WARNING] Failed to remove old rotated log {}: {}",
                    old.display(),
                    e
                );
            }
        }
    }

    /// Gzip a rotated file, removing the original only after success
    fn compress_file(&self, path: &Path) -> Result<()> {
        use std::io::{BufReader, BufWriter};

        let mut gz_name = path.as_os_str().to_owned();
        gz_name.push(".gz");
        let gz_path = PathBuf::from(gz_name);
        let mut tmp_name = gz_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let temp_gz_path = PathBuf::from(tmp_name);

        let compress = || -> std::io::Result<()> {
            let mut reader = BufReader::with_capacity(64 * 1024, File::open(path)?);
            let output = BufWriter::with_capacity(64 * 1024, File::create(&temp_gz_path)?);
            let mut encoder = flate2::write::GzEncoder::new(output, flate2::Compression::default());
            std::io::copy(&mut reader, &mut encoder)?;
            encoder.finish()?.flush()?;
            fs::rename(&temp_gz_path, &gz_path)
        };

        if let Err(e) = compress() {
            let _ = fs::remove_file(&temp_gz_path);
            return Err(LoggerError::file_rotation(
                path.display().to_string(),
                format!("Failed to compress rotated file: {}", e),
            ));
        }

        if let Err(e) = fs::remove_file(path) {
            eprintln!(
                "[LOGGER WARNING] Compression succeeded but failed to remove original file {}: {}",
                path.display(),
                e
            );
        }
        Ok(())
    }
}

impl Handler for RotatingFileHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::File
    }

    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        if self.should_rollover(&record.created) {
            if let Err(e) = self.rollover(&record.created) {
                eprintln!(
                    "[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.",
                    e
                );
                // Keep the record rather than losing it to a failed rotation
                self.rollover_at = next_midnight(&record.created);
                if self.file.is_none() {
                    self.file = Some(
                        OpenOptions::new()
                            .create(true)
                            .append(true)
                            .open(&self.base_path)?,
                    );
                }
            }
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::other("Rotating file handler is closed"))?;

        let mut output = self.formatter.format(record);
        output.push('\n');
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
        "rotating_file"
    }
}

impl Drop for RotatingFileHandler {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
