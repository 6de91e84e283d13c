//! Property tests for the remap engine.

use proptest::prelude::*;
use twb_map::apply;
use twb_model::{MappingRule, MappingSet};

fn rule_set(pairs: &[(String, String)]) -> MappingSet {
    pairs
        .iter()
        .filter_map(|(original, replacement)| MappingRule::new(original, replacement))
        .collect()
}

proptest! {
    #[test]
    fn apply_is_deterministic(
        text in "[ab ]{0,40}",
        pairs in prop::collection::vec(("[ab]{1,3}", "[abc]{0,3}"), 1..6),
    ) {
        let rules = rule_set(&pairs);
        let first = apply(&text, &rules).unwrap();
        let second = apply(&text, &rules).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn report_lists_every_rule_and_sums_to_total(
        text in "[ab ]{0,40}",
        pairs in prop::collection::vec(("[ab]{1,3}", "[abc]{0,3}"), 1..6),
    ) {
        let rules = rule_set(&pairs);
        let remapped = apply(&text, &rules).unwrap();
        prop_assert_eq!(remapped.report.len(), rules.len());
        let sum: usize = remapped.report.entries().iter().map(|e| e.occurrences).sum();
        prop_assert_eq!(sum, remapped.report.total_replacements());
    }

    #[test]
    fn unmatched_rules_leave_text_untouched(
        text in "[xyz ]{0,40}",
        pairs in prop::collection::vec(("[ab]{1,3}", "[abc]{0,3}"), 1..6),
    ) {
        let rules = rule_set(&pairs);
        let remapped = apply(&text, &rules).unwrap();
        prop_assert_eq!(remapped.text, text);
        prop_assert_eq!(remapped.report.total_replacements(), 0);
    }
}
