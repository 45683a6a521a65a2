//! Stress tests for shared loggers and contexts
//!
//! Contexts are cloned into many threads; every record must reach the file
//! intact and carry its own context's fields.

use simple_log_factory::handlers::MemoryHandler;
use simple_log_factory::prelude::*;
use simple_log_factory::fields;
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const MESSAGES_PER_THREAD: usize = 250;

#[test]
fn test_concurrent_context_logging_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");
    let registry = LoggerRegistry::new();

    let generator = LogContextGenerator::new_in(
        LogFactory::new("stress")
            .to_console(false)
            .log_file(&log_file)
            .rotate_file_by_day(false)
            .log_format("{levelname} | {name} | {message} | {fields}"),
        &registry,
    )
    .expect("Failed to build generator");

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let ctx = generator.get_logger_for_context(fields! { worker = worker as i64 });
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..MESSAGES_PER_THREAD {
                    ctx.info(format!("message {}", i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
    generator.logger().flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * MESSAGES_PER_THREAD);

    for worker in 0..THREADS {
        let tag = format!("| worker={}", worker);
        let count = lines.iter().filter(|l| l.ends_with(&tag)).count();
        assert_eq!(count, MESSAGES_PER_THREAD, "worker {} lost records", worker);
    }
    assert!(lines.iter().all(|l| l.starts_with("INFO | stress | message ")));
}

#[test]
fn test_concurrent_builds_share_one_logger() {
    let registry = Arc::new(LoggerRegistry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let loggers: Vec<Arc<Logger>> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                LogFactory::new("contended")
                    .to_console(false)
                    .custom_handler(MemoryHandler::new())
                    .unique_handler_types(true)
                    .build_in(&registry)
                    .expect("build failed")
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().expect("builder panicked"))
        .collect();

    for logger in &loggers[1..] {
        assert!(Arc::ptr_eq(logger, &loggers[0]));
    }
    // Check-and-insert is atomic per logger, so racing builds attach one
    assert_eq!(loggers[0].handler_count(), 1);
    assert_eq!(registry.len(), 1);
}
