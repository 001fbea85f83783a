//! Property-based invariant tests for the template scanner.
//!
//! 1. Concatenated segment sources reproduce any template exactly
//! 2. Literal segments are never empty
//! 3. No two literal segments are adjacent
//! 4. Templates without `%` are a single literal (or nothing)
//! 5. Directive sources always start with `%`
//! 6. Scanning is deterministic

use chat_i18n::format::{FormatKind, Segment, parse};
use proptest::prelude::*;

/// Strings biased towards directive-like fragments.
fn template_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z ,.!?]{1,6}",
            Just("%s".to_string()),
            Just("%d".to_string()),
            Just("%%".to_string()),
            Just("%".to_string()),
            (1usize..12).prop_map(|n| format!("%{n}$s")),
            (0usize..12).prop_map(|n| format!("%{n}$d")),
            "%[a-zA-Z]",
            "%[0-9]{1,3}",
            "[äé✓§]{1,2}",
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn reconstruction_is_exact(template in template_strategy()) {
        let rebuilt: String = parse(&template).map(|s| s.source()).collect();
        prop_assert_eq!(rebuilt, template);
    }

    #[test]
    fn reconstruction_of_arbitrary_strings(template in any::<String>()) {
        let rebuilt: String = parse(&template).map(|s| s.source()).collect();
        prop_assert_eq!(rebuilt, template);
    }

    #[test]
    fn literals_never_empty(template in template_strategy()) {
        for segment in parse(&template) {
            if let Segment::Literal(text) = segment {
                prop_assert!(!text.is_empty());
            }
        }
    }

    #[test]
    fn literals_never_adjacent(template in template_strategy()) {
        let segments: Vec<_> = parse(&template).collect();
        for pair in segments.windows(2) {
            let both_literal = matches!(pair[0], Segment::Literal(_))
                && matches!(pair[1], Segment::Literal(_));
            prop_assert!(!both_literal, "adjacent literals in {:?}", segments);
        }
    }

    #[test]
    fn no_percent_means_single_literal(template in "[^%]{0,40}") {
        let segments: Vec<_> = parse(&template).collect();
        if template.is_empty() {
            prop_assert!(segments.is_empty());
        } else {
            prop_assert_eq!(segments, vec![Segment::Literal(&template)]);
        }
    }

    #[test]
    fn directives_start_with_percent(template in template_strategy()) {
        for segment in parse(&template) {
            match segment {
                Segment::Placeholder { source, kind, .. } => {
                    prop_assert!(source.starts_with('%'));
                    let last = source.chars().last();
                    let expected = match kind {
                        FormatKind::String => 's',
                        FormatKind::Decimal => 'd',
                        FormatKind::PercentLiteral => '%',
                    };
                    prop_assert_eq!(last, Some(expected));
                }
                Segment::Unrecognized(source) => prop_assert!(source.starts_with('%')),
                Segment::Literal(_) => {}
            }
        }
    }

    #[test]
    fn scanning_is_deterministic(template in template_strategy()) {
        let a: Vec<_> = parse(&template).collect();
        let b: Vec<_> = parse(&template).collect();
        prop_assert_eq!(a, b);
    }
}
