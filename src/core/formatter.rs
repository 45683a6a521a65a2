//! Record formatting: timestamp styles and line templates
//!
//! A [`Formatter`] turns a [`LogRecord`] into one output line (plus indented
//! exception lines when the record carries an error). The default line is
//!
//! ```text
//! 2025-01-08 10:30:45 | INFO | svc | Request processed
//! ```

use super::error::{LoggerError, Result};
use super::log_record::LogRecord;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write as _;

pub const DEFAULT_LOG_FORMAT: &str = "{asctime} | {levelname} | {name} | {message}";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const TIME_ONLY_FORMAT: &str = "%H:%M:%S";

/// Timestamp style used for the `{asctime}` column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45`
    #[default]
    DateTime,

    /// `10:30:45`, used by daily-rotated files whose name already carries the date
    TimeOnly,

    /// Any strftime-compatible format string
    Custom(String),
}

impl TimestampFormat {
    /// Custom strftime pattern, rejected if chrono cannot render it
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for unknown or dangling `%` specifiers
    pub fn custom(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::invalid_argument(
                "log_time_format",
                format!("unsupported strftime pattern '{}'", pattern),
            ));
        }
        Ok(TimestampFormat::Custom(pattern))
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            TimestampFormat::DateTime => DATE_TIME_FORMAT,
            TimestampFormat::TimeOnly => TIME_ONLY_FORMAT,
            TimestampFormat::Custom(format_str) => format_str,
        }
    }

    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        datetime.format(self.pattern()).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    AscTime,
    LevelName,
    Name,
    Message,
    Fields,
    Thread,
}

/// Parsed line template
///
/// Recognised placeholders: `{asctime}`, `{levelname}`, `{name}`,
/// `{message}`, `{fields}` (extra fields as `key=value`) and `{thread}`.
/// `{{` and `}}` produce literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFormat {
    source: String,
    segments: Vec<Segment>,
}

impl LogFormat {
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut key = String::new();
                    let mut closed = false;
                    for k in chars.by_ref() {
                        if k == '}' {
                            closed = true;
                            break;
                        }
                        key.push(k);
                    }
                    if !closed {
                        return Err(LoggerError::invalid_argument(
                            "log_format",
                            format!("unclosed placeholder in '{}'", template),
                        ));
                    }
                    let segment = match key.as_str() {
                        "asctime" => Segment::AscTime,
                        "levelname" => Segment::LevelName,
                        "name" => Segment::Name,
                        "message" => Segment::Message,
                        "fields" => Segment::Fields,
                        "thread" => Segment::Thread,
                        other => {
                            return Err(LoggerError::invalid_argument(
                                "log_format",
                                format!("unknown placeholder '{{{}}}'", other),
                            ))
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' => {
                    return Err(LoggerError::invalid_argument(
                        "log_format",
                        format!("unmatched '}}' in '{}'", template),
                    ))
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    fn uses_time(&self) -> bool {
        self.segments.contains(&Segment::AscTime)
    }
}

impl Default for LogFormat {
    fn default() -> Self {
        Self {
            source: DEFAULT_LOG_FORMAT.to_string(),
            segments: vec![
                Segment::AscTime,
                Segment::Literal(" | ".into()),
                Segment::LevelName,
                Segment::Literal(" | ".into()),
                Segment::Name,
                Segment::Literal(" | ".into()),
                Segment::Message,
            ],
        }
    }
}

/// Line formatter shared by every handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatter {
    format: LogFormat,
    timestamp_format: TimestampFormat,
    use_colors: bool,
}

impl Formatter {
    pub fn new(format: LogFormat, timestamp_format: TimestampFormat) -> Self {
        Self {
            format,
            timestamp_format,
            use_colors: false,
        }
    }

    /// Formatter with the default template and the given timestamp style
    pub fn with_timestamp(timestamp_format: TimestampFormat) -> Self {
        Self::new(LogFormat::default(), timestamp_format)
    }

    /// Colour the level column; only takes effect with the `console` feature
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn log_format(&self) -> &LogFormat {
        &self.format
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    pub fn format(&self, record: &LogRecord) -> String {
        let asctime = if self.format.uses_time() {
            self.timestamp_format.format(&record.created)
        } else {
            String::new()
        };

        let mut out = String::with_capacity(64 + record.message.len());
        for segment in &self.format.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::AscTime => out.push_str(&asctime),
                Segment::LevelName => out.push_str(&self.level_column(record)),
                Segment::Name => out.push_str(&record.logger_name),
                Segment::Message => out.push_str(&record.message),
                Segment::Fields => out.push_str(&record.fields.format_fields()),
                Segment::Thread => {
                    out.push_str(record.thread_name.as_ref().unwrap_or(&record.thread_id))
                }
            }
        }

        if let Some(ref exception) = record.exception {
            let rendered = exception.render();
            if !rendered.is_empty() {
                let _ = write!(out, "\n{}", rendered);
            }
        }
        out
    }

    #[cfg(feature = "console")]
    fn level_column(&self, record: &LogRecord) -> String {
        use colored::Colorize;
        if self.use_colors {
            record
                .level
                .to_str()
                .color(record.level.color_code())
                .to_string()
        } else {
            record.level.to_str().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_column(&self, record: &LogRecord) -> String {
        record.level.to_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExceptionInfo, ExtraFields, LogLevel};
    use chrono::TimeZone;

    fn fixed_record() -> LogRecord {
        let created = Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
        LogRecord::new(LogLevel::Info, "svc", "hello").with_created(created)
    }

    #[test]
    fn test_default_format() {
        let line = Formatter::default().format(&fixed_record());
        assert_eq!(line, "2025-01-08 10:30:45 | INFO | svc | hello");
    }

    #[test]
    fn test_time_only_format() {
        let line = Formatter::with_timestamp(TimestampFormat::TimeOnly).format(&fixed_record());
        assert_eq!(line, "10:30:45 | INFO | svc | hello");
    }

    #[test]
    fn test_custom_template_and_time() {
        let format = LogFormat::parse("[{asctime}] {{{levelname}}} {message} {fields}").unwrap();
        let formatter = Formatter::new(format, TimestampFormat::Custom("%Y".into()));
        let record = fixed_record().with_fields(ExtraFields::new().with("k", "v"));

        assert_eq!(formatter.format(&record), "[2025] {INFO} hello k=v");
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = LogFormat::parse("{asctime} {lineno}").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(LogFormat::parse("{message").unwrap_err().is_invalid_argument());
        assert!(LogFormat::parse("message}").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_custom_time_pattern_checked() {
        assert_eq!(
            TimestampFormat::custom("%d/%m %H:%M").unwrap().format(&fixed_record().created),
            "08/01 10:30"
        );
        for bad in ["%Y-%Q", "%H:%M %"] {
            assert!(TimestampFormat::custom(bad).unwrap_err().is_invalid_argument(), "{bad}");
        }
    }

    #[test]
    fn test_default_matches_parsed_default() {
        assert_eq!(LogFormat::parse(DEFAULT_LOG_FORMAT).unwrap(), LogFormat::default());
    }

    #[test]
    fn test_exception_lines_follow_record() {
        let record = fixed_record().with_exception(ExceptionInfo {
            type_name: Some("io::Error".into()),
            message: Some("denied".into()),
            causes: vec![],
            backtrace: None,
        });
        let line = Formatter::default().format(&record);
        assert_eq!(line, "2025-01-08 10:30:45 | INFO | svc | hello\n    io::Error: denied");

        let empty = fixed_record().with_exception(ExceptionInfo::none());
        assert_eq!(
            Formatter::default().format(&empty),
            "2025-01-08 10:30:45 | INFO | svc | hello"
        );
    }
}
