//! Property-based tests for simple_log_factory using proptest

use proptest::collection::btree_map;
use proptest::prelude::*;
use simple_log_factory::handlers::MemoryHandler;
use simple_log_factory::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warning),
        Just(LogLevel::Error),
        Just(LogLevel::Critical),
    ]
}

proptest! {
    /// Any name with a non-whitespace character yields a logger of that name
    #[test]
    fn test_logger_name_preserved(name in "[a-zA-Z0-9_.-]{0,8}[a-zA-Z0-9_][a-zA-Z0-9_ .-]{0,8}") {
        let registry = LoggerRegistry::new();
        let logger = LogFactory::new(name.clone())
            .to_console(false)
            .build_in(&registry)
            .unwrap();
        prop_assert_eq!(logger.name(), name.as_str());
    }

    /// Whitespace-only names are rejected before the registry is touched
    #[test]
    fn test_blank_names_rejected(name in "[ \t\n\r]{0,6}") {
        let registry = LoggerRegistry::new();
        let err = LogFactory::new(name).build_in(&registry).unwrap_err();
        prop_assert!(err.is_invalid_argument());
        prop_assert!(registry.is_empty());
    }

    /// Level strings roundtrip case-insensitively
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), lower in any::<bool>()) {
        let text = if lower { level.to_str().to_lowercase() } else { level.to_str().to_string() };
        let parsed: LogLevel = text.parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(format!("{}", level), level.to_str());
    }

    /// With dedup on, repeated builds never exceed one handler per kind
    #[test]
    fn test_dedup_bounded(calls in 1usize..8) {
        let registry = LoggerRegistry::new();
        let mut count = 0;
        for _ in 0..calls {
            let logger = LogFactory::new("dedup")
                .unique_handler_types(true)
                .build_in(&registry)
                .unwrap();
            count = logger.handler_count();
        }
        prop_assert_eq!(count, 1);
    }

    /// Without dedup, handler count equals the number of builds
    #[test]
    fn test_no_dedup_grows(calls in 1usize..8) {
        let registry = LoggerRegistry::new();
        let mut count = 0;
        for _ in 0..calls {
            count = LogFactory::new("grow").build_in(&registry).unwrap().handler_count();
        }
        prop_assert_eq!(count, calls);
    }

    /// Records keep exactly the bound fields, at every level
    #[test]
    fn test_context_fields_unchanged(
        raw in btree_map("[a-z_]{1,8}", "[a-zA-Z0-9 ]{0,12}", 0..6),
        level in any_level(),
    ) {
        let registry = LoggerRegistry::new();
        let memory = MemoryHandler::new();
        let buffer = memory.buffer();
        let generator = LogContextGenerator::new_in(
            LogFactory::new("prop_ctx").to_console(false).custom_handler(memory),
            &registry,
        )
        .unwrap();

        let fields: ExtraFields = raw.clone().into_iter().collect();
        let ctx = generator.get_logger_for_context(fields.clone());
        ctx.log(level, "message");

        let records = buffer.records();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(&records[0].fields, &fields);
        prop_assert_eq!(records[0].fields.len(), raw.len());
    }
}
