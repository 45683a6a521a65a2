//! Name → logger registry
//!
//! Asking for the same name twice yields the same `Arc<Logger>`, so callers
//! sharing a name share configuration. Tests create their own
//! `LoggerRegistry` instead of touching the process-wide one.

use super::log_level::LogLevel;
use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub const ROOT_LOGGER_NAME: &str = "root";

/// Level of a fresh registry's root logger
pub const DEFAULT_ROOT_LEVEL: LogLevel = LogLevel::Warning;

pub struct LoggerRegistry {
    root: Arc<Logger>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self {
            root: Arc::new(Logger::new(ROOT_LOGGER_NAME, Some(DEFAULT_ROOT_LEVEL), None)),
            loggers: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry used by [`log_factory`](crate::log_factory)
    pub fn global() -> &'static LoggerRegistry {
        static GLOBAL: OnceLock<LoggerRegistry> = OnceLock::new();
        GLOBAL.get_or_init(LoggerRegistry::new)
    }

    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// Existing logger for `name`, if one was created
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    /// Return the logger registered under `name`, creating it if needed
    ///
    /// An empty name yields the root logger. A new logger is parented to its
    /// nearest existing dotted ancestor (or the root), and existing
    /// descendants that were parented above it are moved under it.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if name.is_empty() {
            return self.root();
        }
        if let Some(logger) = self.get(name) {
            return logger;
        }

        let mut loggers = self.loggers.write();
        // Another thread may have created it between the two locks
        if let Some(logger) = loggers.get(name) {
            return Arc::clone(logger);
        }

        let parent = Self::nearest_ancestor(&loggers, name).unwrap_or_else(|| self.root());
        let logger = Arc::new(Logger::new(name, None, Some(parent)));

        let prefix = format!("{}.", name);
        for (other_name, other) in loggers.iter() {
            if !other_name.starts_with(&prefix) {
                continue;
            }
            let reparent = match other.parent() {
                None => false,
                Some(p) => Arc::ptr_eq(&p, &self.root) || name.starts_with(&format!("{}.", p.name())),
            };
            if reparent {
                other.set_parent(Arc::clone(&logger));
            }
        }

        loggers.insert(name.to_string(), Arc::clone(&logger));
        logger
    }

    fn nearest_ancestor(loggers: &HashMap<String, Arc<Logger>>, name: &str) -> Option<Arc<Logger>> {
        let mut candidate = name;
        while let Some((head, _)) = candidate.rsplit_once('.') {
            if let Some(logger) = loggers.get(head) {
                return Some(Arc::clone(logger));
            }
            candidate = head;
        }
        None
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_logger() {
        let registry = LoggerRegistry::new();
        let a = registry.get_logger("svc");
        let b = registry.get_logger("svc");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_root_has_no_parent() {
        let registry = LoggerRegistry::new();
        let root = registry.root();
        assert!(root.parent().is_none());
        assert!(root.is_root());
        assert_eq!(root.level(), Some(DEFAULT_ROOT_LEVEL));
        assert!(Arc::ptr_eq(&registry.get_logger(""), &root));
    }

    #[test]
    fn test_parent_is_nearest_ancestor() {
        let registry = LoggerRegistry::new();
        let app = registry.get_logger("app");
        let leaf = registry.get_logger("app.db.pool");

        assert!(Arc::ptr_eq(&leaf.parent().unwrap(), &app));
        assert!(Arc::ptr_eq(&app.parent().unwrap(), &registry.root()));
    }

    #[test]
    fn test_intermediate_logger_adopts_children() {
        let registry = LoggerRegistry::new();
        let leaf = registry.get_logger("app.db.pool");
        assert!(Arc::ptr_eq(&leaf.parent().unwrap(), &registry.root()));

        let app = registry.get_logger("app");
        assert!(Arc::ptr_eq(&leaf.parent().unwrap(), &app));

        let db = registry.get_logger("app.db");
        assert!(Arc::ptr_eq(&leaf.parent().unwrap(), &db));
        assert!(Arc::ptr_eq(&db.parent().unwrap(), &app));

        // "app.dbx" is not a descendant of "app.db"
        let sibling = registry.get_logger("app.dbx");
        assert!(Arc::ptr_eq(&sibling.parent().unwrap(), &app));
    }

    #[test]
    fn test_registries_are_isolated() {
        let first = LoggerRegistry::new();
        let second = LoggerRegistry::new();
        let a = first.get_logger("svc");
        let b = second.get_logger("svc");
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
