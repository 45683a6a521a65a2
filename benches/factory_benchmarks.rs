//! Criterion benchmarks for simple_log_factory

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use simple_log_factory::fields;
use simple_log_factory::handlers::MemoryHandler;
use simple_log_factory::prelude::*;

// ============================================================================
// Builder Benchmarks
// ============================================================================

fn bench_factory_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("factory_build");
    group.throughput(Throughput::Elements(1));

    group.bench_function("fresh_registry", |b| {
        b.iter(|| {
            let registry = LoggerRegistry::new();
            let logger = LogFactory::new("bench").build_in(&registry).unwrap();
            black_box(logger)
        });
    });

    let registry = LoggerRegistry::new();
    group.bench_function("dedup_rebuild", |b| {
        b.iter(|| {
            let logger = LogFactory::new("bench")
                .unique_handler_types(true)
                .build_in(&registry)
                .unwrap();
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Emission Benchmarks
// ============================================================================

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    group.throughput(Throughput::Elements(1));

    let registry = LoggerRegistry::new();
    let memory = MemoryHandler::new();
    let buffer = memory.buffer();
    let generator = LogContextGenerator::new_in(
        LogFactory::new("bench.emit").to_console(false).custom_handler(memory),
        &registry,
    )
    .unwrap();

    group.bench_function("logger_info", |b| {
        let logger = generator.logger();
        b.iter(|| {
            logger.info(black_box("benchmark message"));
            buffer.clear();
        });
    });

    group.bench_function("context_info", |b| {
        let ctx = generator.get_logger_for_context(fields! { request_id = "r1", attempt = 1 });
        b.iter(|| {
            ctx.info(black_box("benchmark message"));
            buffer.clear();
        });
    });

    group.bench_function("filtered_debug", |b| {
        let logger = generator.logger();
        logger.set_min_level(LogLevel::Warning);
        b.iter(|| logger.debug(black_box("dropped")));
        logger.set_min_level(LogLevel::Debug);
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    let record = LogRecord::new(LogLevel::Info, "bench", "formatted message")
        .with_fields(fields! { user = "alice", id = 7 });

    for (name, formatter) in [
        ("date_time", Formatter::default()),
        ("time_only", Formatter::with_timestamp(TimestampFormat::TimeOnly)),
        (
            "with_fields",
            Formatter::new(
                LogFormat::parse("{asctime} | {levelname} | {name} | {message} | {fields}").unwrap(),
                TimestampFormat::DateTime,
            ),
        ),
    ] {
        group.bench_function(name, |b| b.iter(|| black_box(formatter.format(&record))));
    }

    group.finish();
}

criterion_group!(benches, bench_factory_build, bench_emit, bench_format);
criterion_main!(benches);
