//! Log record structure

use super::fields::ExtraFields;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::RefCell;
use std::error::Error;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Error details attached by `exception`-style calls
///
/// An empty payload (all fields unset) records that an exception log was
/// requested while no error was at hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub type_name: Option<String>,
    pub message: Option<String>,
    /// Messages of `source()` errors, outermost first
    pub causes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<String>,
}

impl ExceptionInfo {
    /// Payload for an exception call made with no error in scope
    pub fn none() -> Self {
        Self::default()
    }

    /// Capture type, message, cause chain and (if enabled) a backtrace
    ///
    /// The type name is the static type of `error`. Behind a trait object
    /// (`&dyn Error`, `Box<dyn Error>`) the concrete type is not known, so
    /// `type_name` stays `None` and the rendered line starts with `error:`.
    pub fn capture<E>(error: &E) -> Self
    where
        E: Error + ?Sized,
    {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        let backtrace = Backtrace::capture();
        let backtrace = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        let type_name = std::any::type_name::<E>();
        Self {
            type_name: (!type_name.starts_with("dyn ")).then(|| type_name.to_string()),
            message: Some(error.to_string()),
            causes,
            backtrace,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.type_name.is_none() && self.message.is_none() && self.causes.is_empty()
    }

    /// Render as indented lines following the record's main line
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut out = format!(
            "    {}: {}",
            self.type_name.as_deref().unwrap_or("error"),
            self.message.as_deref().unwrap_or_default()
        );
        for cause in &self.causes {
            out.push_str("\n    caused by: ");
            out.push_str(cause);
        }
        if let Some(ref backtrace) = self.backtrace {
            for line in backtrace.lines() {
                out.push_str("\n    ");
                out.push_str(line);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub logger_name: String,
    pub message: String,
    pub created: DateTime<Local>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    #[serde(skip_serializing_if = "ExtraFields::is_empty", default)]
    pub fields: ExtraFields,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exception: Option<ExceptionInfo>,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, logger_name: impl Into<String>, message: impl AsRef<str>) -> Self {
        Self {
            level,
            logger_name: logger_name.into(),
            message: Self::sanitize_message(message.as_ref()),
            created: Local::now(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            fields: ExtraFields::new(),
            exception: None,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: ExtraFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    #[must_use]
    pub fn with_created(mut self, created: DateTime<Local>) -> Self {
        self.created = created;
        self
    }

    /// JSON view of the record for processors that want structured data
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "created": self.created.to_rfc3339(),
            "level": self.level.to_str(),
            "name": self.logger_name,
            "message": self.message,
            "thread": self.thread_name.as_ref().unwrap_or(&self.thread_id),
            "extra": self.fields.to_json_value(),
            "exception": self.exception,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "disk unplugged")
        }
    }

    impl Error for Inner {}

    #[derive(Debug)]
    struct Outer(Inner);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "save failed")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_message_sanitized() {
        let record = LogRecord::new(LogLevel::Info, "svc", "a\nb\tc");
        assert_eq!(record.message, "a\\nb\\tc");
        assert_eq!(record.logger_name, "svc");
    }

    #[test]
    fn test_exception_capture_chain() {
        let info = ExceptionInfo::capture(&Outer(Inner));

        assert!(info.type_name.as_deref().unwrap().ends_with("Outer"));
        assert_eq!(info.message.as_deref(), Some("save failed"));
        assert_eq!(info.causes, vec!["disk unplugged".to_string()]);

        let rendered = info.render();
        assert!(rendered.contains("save failed"));
        assert!(rendered.contains("caused by: disk unplugged"));
    }

    #[test]
    fn test_trait_object_has_no_type_name() {
        let boxed: Box<dyn Error> = Box::new(Outer(Inner));
        let info = ExceptionInfo::capture(boxed.as_ref());

        assert_eq!(info.type_name, None);
        assert!(!info.is_empty());
        assert!(info.render().starts_with("    error: save failed"));
        assert_eq!(info.causes, vec!["disk unplugged".to_string()]);
    }

    #[test]
    fn test_empty_exception_renders_nothing() {
        let info = ExceptionInfo::none();
        assert!(info.is_empty());
        assert_eq!(info.render(), "");
    }

    #[test]
    fn test_json_value_carries_extra() {
        let record = LogRecord::new(LogLevel::Warning, "svc", "hi")
            .with_fields(ExtraFields::new().with("request_id", "r1"));

        let json = record.to_json_value();
        assert_eq!(json["level"], "WARNING");
        assert_eq!(json["name"], "svc");
        assert_eq!(json["extra"]["request_id"], "r1");
        assert!(json["exception"].is_null());
    }
}
