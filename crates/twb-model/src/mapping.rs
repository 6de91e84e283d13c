//! Mapping rules and the per-rule replacement report.

use serde::{Deserialize, Serialize};

/// A single rename: every occurrence of `original` becomes `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRule {
    pub original: String,
    pub replacement: String,
}

impl MappingRule {
    /// Build a rule from raw column values.
    ///
    /// Both values are trimmed. Returns `None` when `original` is empty after
    /// trimming, since an empty pattern would match between every character.
    pub fn new(original: &str, replacement: &str) -> Option<Self> {
        let original = original.trim();
        if original.is_empty() {
            return None;
        }
        Some(Self {
            original: original.to_string(),
            replacement: replacement.trim().to_string(),
        })
    }
}

/// Ordered sequence of mapping rules.
///
/// Order is significant and duplicate originals are kept: each rule is
/// applied to the output of the rules before it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingSet {
    rules: Vec<MappingRule>,
}

impl MappingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: MappingRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingRule> {
        self.rules.iter()
    }
}

impl FromIterator<MappingRule> for MappingSet {
    fn from_iter<I: IntoIterator<Item = MappingRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MappingSet {
    type Item = &'a MappingRule;
    type IntoIter = std::slice::Iter<'a, MappingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Occurrences found for one rule, counted just before it was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub original: String,
    pub replacement: String,
    pub occurrences: usize,
}

/// Per-rule occurrence report, one entry per rule in application order.
///
/// Rules that matched nothing are still listed with zero occurrences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplacementReport {
    entries: Vec<RuleOutcome>,
}

impl ReplacementReport {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Record the occurrence count for `rule`.
    pub fn record(&mut self, rule: &MappingRule, occurrences: usize) {
        self.entries.push(RuleOutcome {
            original: rule.original.clone(),
            replacement: rule.replacement.clone(),
            occurrences,
        });
    }

    pub fn entries(&self) -> &[RuleOutcome] {
        &self.entries
    }

    /// Sum of occurrences across every rule.
    pub fn total_replacements(&self) -> usize {
        self.entries.iter().map(|entry| entry.occurrences).sum()
    }

    /// Occurrences recorded for `original`, summed over duplicate rules.
    ///
    /// Returns `None` when no rule has that original.
    pub fn count_for(&self, original: &str) -> Option<usize> {
        self.entries
            .iter()
            .filter(|entry| entry.original == original)
            .map(|entry| entry.occurrences)
            .reduce(|total, count| total + count)
    }

    /// Number of distinct originals that replaced at least one occurrence.
    pub fn matched_originals(&self) -> usize {
        let mut seen: Vec<&str> = Vec::new();
        for entry in self.entries.iter().filter(|entry| entry.occurrences > 0) {
            if !seen.contains(&entry.original.as_str()) {
                seen.push(&entry.original);
            }
        }
        seen.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
