//! Ordered, chained text substitution.
//!
//! Rules run one after another over the evolving text. A later rule sees
//! everything earlier rules wrote, so it may match text an earlier
//! replacement introduced, and a repeated original usually finds nothing
//! left to replace. Matching is plain substring matching over the whole
//! document; it does not stop at attribute or word boundaries.
//!
//! This must not be collapsed into a single multi-pattern pass: that would
//! drop the chaining and change the counts.

use tracing::{debug, info};
use twb_model::{MappingSet, ReplacementReport};

use crate::error::MappingError;

/// Rewritten text together with the per-rule report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remapped {
    pub text: String,
    pub report: ReplacementReport,
}

/// Apply `rules` to `document` in order.
///
/// For each rule the non-overlapping occurrences of its original in the
/// current text are counted, then all of them are replaced. Fails only when
/// `rules` is empty.
pub fn apply(document: &str, rules: &MappingSet) -> Result<Remapped, MappingError> {
    if rules.is_empty() {
        return Err(MappingError::Empty);
    }

    let mut current = document.to_string();
    let mut report = ReplacementReport::with_capacity(rules.len());
    for rule in rules {
        let occurrences = current.matches(rule.original.as_str()).count();
        if occurrences > 0 {
            current = current.replace(rule.original.as_str(), &rule.replacement);
        }
        debug!(
            original = %rule.original,
            replacement = %rule.replacement,
            occurrences,
            "applied mapping rule"
        );
        report.record(rule, occurrences);
    }

    info!(
        rules = rules.len(),
        total_replacements = report.total_replacements(),
        "remap complete"
    );
    Ok(Remapped {
        text: current,
        report,
    })
}
