//! Primary-key uniqueness auditing over a file's first column.

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

/// How many duplicated values to show as examples in the report.
const EXAMPLE_LIMIT: usize = 3;

/// Duplicate summary for one file: the number of distinct duplicated values
/// plus a few `(value, count)` examples for operator triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyFinding {
    pub duplicate_values: usize,
    pub examples: Vec<(String, usize)>,
}

/// Accumulates first-column values across all rows of a file. Unlike the
/// data-issue sampling, the audit is never capped.
#[derive(Debug, Default)]
pub struct KeyAuditor {
    counts: HashMap<String, usize>,
}

impl KeyAuditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: &str) {
        *self.counts.entry(value.to_string()).or_insert(0) += 1;
    }

    /// Returns the duplicate summary, or `None` when no value occurred more
    /// than once (including the no-rows case).
    pub fn finish(self) -> Option<KeyFinding> {
        let duplicated: Vec<(String, usize)> = self
            .counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .collect();
        if duplicated.is_empty() {
            return None;
        }
        let duplicate_values = duplicated.len();
        let examples = duplicated
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .take(EXAMPLE_LIMIT)
            .collect();
        Some(KeyFinding {
            duplicate_values,
            examples,
        })
    }
}
