//! Streaming row scanner: applies the lexical checkers to each data row and
//! feeds the primary-key auditor.

use crate::{
    checks,
    keys::{KeyAuditor, KeyFinding},
    rules::RuleSet,
};

/// Data issues are retained only while the logical row number is at or below
/// this bound. The header is row 1, so rows 2 through 6 (the first five data
/// rows) are the sample window.
pub const ISSUE_SAMPLE_LAST_ROW: usize = 6;

/// Which checkers apply to a column, resolved once per file from the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnClass {
    pub date_like: bool,
    pub numeric_like: bool,
}

/// Totals collected by a full scan of one file's data rows.
#[derive(Debug)]
pub struct ScanStats {
    pub record_count: usize,
    pub data_issues: Vec<String>,
    pub key_finding: Option<KeyFinding>,
}

pub struct RowScanner<'a> {
    headers: &'a [String],
    classes: Vec<ColumnClass>,
    record_count: usize,
    data_issues: Vec<String>,
    auditor: KeyAuditor,
}

impl<'a> RowScanner<'a> {
    pub fn new(headers: &'a [String], rules: &RuleSet) -> Self {
        let classes = headers
            .iter()
            .map(|name| ColumnClass {
                date_like: rules.is_date_column(name),
                numeric_like: rules.is_numeric_column(name),
            })
            .collect();
        Self {
            headers,
            classes,
            record_count: 0,
            data_issues: Vec::new(),
            auditor: KeyAuditor::new(),
        }
    }

    /// Processes one data row. `row_num` is the logical 1-based position in
    /// the file with the header as row 1; passing it explicitly keeps the
    /// sampling window testable without threading hidden state.
    ///
    /// Rows shorter than the header are padded with empty values; extra
    /// trailing fields are ignored. An entirely empty record contributes
    /// nothing to the key audit.
    pub fn scan_row(&mut self, row_num: usize, record: &[String]) {
        self.record_count += 1;
        for (idx, name) in self.headers.iter().enumerate() {
            let value = record.get(idx).map(String::as_str).unwrap_or("");
            let class = self.classes[idx];
            if class.date_like
                && let Some(issue) = checks::check_date_format(value, name)
            {
                self.retain_issue(row_num, None, &issue);
            }
            if class.numeric_like
                && let Some(issue) = checks::check_numeric_format(value, name)
            {
                self.retain_issue(row_num, None, &issue);
            }
            if !value.is_empty()
                && let Some(issue) = checks::check_special_characters(value)
            {
                self.retain_issue(row_num, Some(name), &issue);
            }
        }
        if let Some(key) = record.first() {
            self.auditor.record(key);
        }
    }

    fn retain_issue(&mut self, row_num: usize, column: Option<&str>, issue: &str) {
        if row_num > ISSUE_SAMPLE_LAST_ROW {
            return;
        }
        match column {
            Some(name) => self.data_issues.push(format!("row {row_num} {name}: {issue}")),
            None => self.data_issues.push(format!("row {row_num}: {issue}")),
        }
    }

    pub fn finish(self) -> ScanStats {
        ScanStats {
            record_count: self.record_count,
            data_issues: self.data_issues,
            key_finding: self.auditor.finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn scan(headers: &[&str], rows: &[&[&str]]) -> ScanStats {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let rules = RuleSet::default();
        let mut scanner = RowScanner::new(&headers, &rules);
        for (idx, values) in rows.iter().enumerate() {
            scanner.scan_row(idx + 2, &row(values));
        }
        scanner.finish()
    }

    #[test]
    fn issues_are_sampled_from_the_first_five_data_rows_only() {
        let bad_rows: Vec<&[&str]> = vec![
            &["1", "not-a-date"],
            &["2", "not-a-date"],
            &["3", "not-a-date"],
            &["4", "not-a-date"],
            &["5", "not-a-date"],
            &["6", "not-a-date"],
            &["7", "not-a-date"],
        ];
        let stats = scan(&["id", "ship_date"], &bad_rows);
        assert_eq!(stats.record_count, 7);
        assert_eq!(stats.data_issues.len(), 5);
        assert!(stats.data_issues[0].starts_with("row 2:"));
        assert!(stats.data_issues[4].starts_with("row 6:"));
    }

    #[test]
    fn key_audit_is_not_subject_to_the_sampling_window() {
        let rows: Vec<&[&str]> = vec![
            &["X"],
            &["X"],
            &["X"],
            &["X"],
            &["X"],
            &["X"],
            &["X"],
            &["X"],
        ];
        let stats = scan(&["id"], &rows);
        let finding = stats.key_finding.expect("finding");
        assert_eq!(finding.examples, vec![("X".to_string(), 8)]);
    }

    #[test]
    fn short_rows_are_tolerated() {
        let rows: Vec<&[&str]> = vec![&["1", "2024-01-01", "10"], &["2"], &[]];
        let stats = scan(&["id", "order_date", "quantity"], &rows);
        assert_eq!(stats.record_count, 3);
        assert!(stats.data_issues.is_empty());
        // The empty record contributed no key value.
        assert_eq!(stats.key_finding, None);
    }

    #[test]
    fn checker_dispatch_follows_column_classification() {
        let rows: Vec<&[&str]> = vec![&["1", "01/15/2024", "1,23.4", "01/15/2024"]];
        let stats = scan(&["id", "order_date", "amount", "note"], &rows);
        // The malformed date in the `note` column is not a date column, so
        // only the date and numeric columns produce issues.
        assert_eq!(stats.data_issues.len(), 2);
        assert!(stats.data_issues[0].contains("order_date"));
        assert!(stats.data_issues[1].contains("amount"));
    }

    #[test]
    fn special_characters_are_checked_in_every_column() {
        let rows: Vec<&[&str]> = vec![&["1", "bad\"value"]];
        let stats = scan(&["id", "note"], &rows);
        assert_eq!(stats.data_issues.len(), 1);
        assert!(stats.data_issues[0].starts_with("row 2 note:"));
    }
}
