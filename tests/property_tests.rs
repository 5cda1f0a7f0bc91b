//! Property-based tests for rust_leveled_logger using proptest

use proptest::prelude::*;
use rust_leveled_logger::prelude::*;
use rust_leveled_logger::LEVEL_STEP;

fn any_level() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Level names roundtrip through parse
    #[test]
    fn test_level_name_roundtrip(level in any_level()) {
        assert_eq!(Level::parse(level.as_str()), level);
        assert_eq!(level.to_string(), level.as_str());
    }

    /// Ordering follows the numeric values
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        assert_eq!(a <= b, a.value() <= b.value());
        assert_eq!(a < b, a.value() < b.value());
        assert_eq!(a.value() % LEVEL_STEP, 0);
    }

    /// next/previous move one step and saturate at the ends
    #[test]
    fn test_level_next_previous(level in any_level()) {
        if level == Level::Null {
            assert_eq!(level.next(), Level::Null);
        } else {
            assert_eq!(level.next().value(), level.value() + LEVEL_STEP);
            assert_eq!(level.next().previous(), level);
        }
        if level == Level::All {
            assert_eq!(level.previous(), Level::All);
        } else {
            assert_eq!(level.previous().value(), level.value() - LEVEL_STEP);
        }
    }

    /// Anything that is not a lowercase level name parses to Null
    #[test]
    fn test_unknown_names_parse_to_null(name in "[A-Z0-9 _-]{1,12}") {
        assert_eq!(Level::parse(&name), Level::Null);
    }

    /// JSON serialization uses the level name
    #[test]
    fn test_level_json_roundtrip(level in any_level()) {
        let json = serde_json::to_string(&level).unwrap();
        assert_eq!(json, format!("\"{}\"", level.as_str()));
        let back: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(back, level);
    }
}

// ============================================================================
// Routing Tests
// ============================================================================

proptest! {
    /// A handler receives a record iff its level is inside the window
    #[test]
    fn test_window_gating(a in any_level(), b in any_level(), level in any_level()) {
        let (from, to) = if a <= b { (a, b) } else { (b, a) };
        let sink = MemorySink::new();
        let logger = Logger::new("gating");
        logger.add_handler(
            Handler::new(from, to, TemplateFormatter::new("{message}"), sink.clone()).unwrap(),
        );

        logger.log(level, "x");

        let expected = usize::from(from <= level && level <= to);
        assert_eq!(sink.len(), expected);
    }

    /// Inverted windows are always rejected
    #[test]
    fn test_inverted_window_rejected(a in any_level(), b in any_level()) {
        prop_assume!(a != b);
        let (from, to) = if a > b { (a, b) } else { (b, a) };
        let handler = Handler::new(from, to, TemplateFormatter::default(), MemorySink::new());
        assert!(handler.is_err());
    }
}

// ============================================================================
// Payload Tests
// ============================================================================

proptest! {
    /// Free-text messages never contain raw line breaks or tabs (log injection)
    #[test]
    fn test_message_sanitization(message in ".*") {
        let payload = Payload::message(message.clone());
        let sanitized = payload.as_message().unwrap();
        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\r'));
        assert!(!sanitized.contains('\t'));
        if message.contains('\n') {
            assert!(sanitized.contains("\\n"));
        }
    }

    /// Pairs with distinct keys produce one field per complete pair; a
    /// trailing key is dropped
    #[test]
    fn test_pairs_drop_trailing_key(values in prop::collection::vec(any::<i64>(), 0..20), odd in any::<bool>()) {
        let mut pairs = Vec::new();
        for (i, value) in values.iter().enumerate() {
            pairs.push(FieldValue::from(format!("k{}", i)));
            pairs.push(FieldValue::from(*value));
        }
        if odd {
            pairs.push(FieldValue::from("orphan"));
        }

        let fields = Fields::from_pairs(pairs);
        assert_eq!(fields.len(), values.len());
        assert!(fields.get("orphan").is_none());
        for (i, value) in values.iter().enumerate() {
            assert_eq!(fields.get(&format!("k{}", i)), Some(&FieldValue::Int(*value)));
        }
    }
}

// ============================================================================
// Async Pipeline Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Records come out in the order they went in, for any queue size
    #[test]
    fn test_async_fifo(count in 0usize..200, capacity in 1usize..16) {
        let sink = MemorySink::new();
        let logger = Logger::with_async("fifo", capacity).unwrap();
        logger.add_handler(
            Handler::new(Level::All, Level::Null, TemplateFormatter::new("{message}"), sink.clone())
                .unwrap(),
        );

        for i in 0..count {
            logger.info(i.to_string());
        }
        logger.wait();

        let expected: Vec<String> = (0..count).map(|i| i.to_string()).collect();
        assert_eq!(sink.lines(), expected);
    }
}
