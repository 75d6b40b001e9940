//! Deterministic rendering of check results.
//!
//! Purely formatting: every verdict is already final when it arrives here.
//! The same result list always renders to byte-identical output.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::model::CheckResult;

const RULE: &str =
    "================================================================================";

/// At most this many field or data issues are printed per file; the rest are
/// summarized as a suppressed count.
const ISSUE_DISPLAY_LIMIT: usize = 10;

pub fn render_report(results: &[CheckResult]) -> String {
    let mut out = String::new();
    let compatible = results.iter().filter(|r| r.compatible).count();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Database import compatibility report");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Total files: {}", results.len());
    let _ = writeln!(out, "Compatible: {compatible}");
    let _ = writeln!(out, "Needs attention: {}", results.len() - compatible);

    for result in results {
        render_file(&mut out, result);
    }

    let _ = writeln!(out);
    render_guidance(&mut out);
    out
}

pub fn render_json(results: &[CheckResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("Rendering JSON report")
}

fn render_file(out: &mut String, result: &CheckResult) {
    let status = if result.compatible {
        "[OK] compatible"
    } else {
        "[X] needs attention"
    };
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "File: {} - {status}", result.file_name);
    let _ = writeln!(out, "Table: {}", result.table_name);
    let _ = writeln!(out, "Encoding: {}", result.encoding);
    let _ = writeln!(out, "Fields: {}", result.field_count);
    let _ = writeln!(out, "Records: {}", result.record_count);

    if !result.field_issues.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Field issues ({}):", result.field_issues.len());
        for issue in result.field_issues.iter().take(ISSUE_DISPLAY_LIMIT) {
            let _ = writeln!(out, "  - {issue}");
        }
    }

    if let Some(finding) = &result.key_finding {
        let _ = writeln!(out);
        let _ = writeln!(out, "Primary key findings:");
        let _ = writeln!(out, "  - {} duplicated value(s)", finding.duplicate_values);
        for (value, count) in &finding.examples {
            let _ = writeln!(out, "  - example: '{value}' occurs {count} times");
        }
    }

    if !result.data_issues.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Data format issues (showing up to {ISSUE_DISPLAY_LIMIT}):"
        );
        for issue in result.data_issues.iter().take(ISSUE_DISPLAY_LIMIT) {
            let _ = writeln!(out, "  - {issue}");
        }
        if result.data_issues.len() > ISSUE_DISPLAY_LIMIT {
            let _ = writeln!(
                out,
                "  ... {} more suppressed",
                result.data_issues.len() - ISSUE_DISPLAY_LIMIT
            );
        }
    }

    if !result.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings:");
        for warning in &result.warnings {
            let _ = writeln!(out, "  - {warning}");
        }
    }
}

fn render_guidance(out: &mut String) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Import guidance:");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "1. Import tool settings:");
    let _ = writeln!(out, "   - Encoding: UTF-8 or UTF-8 with BOM");
    let _ = writeln!(out, "   - Delimiter: comma (,)");
    let _ = writeln!(out, "   - Text qualifier: double quote (\")");
    let _ = writeln!(out, "   - First row contains column names: yes");
    let _ = writeln!(out);
    let _ = writeln!(out, "2. Field names:");
    let _ = writeln!(out, "   - Quote reserved words when creating the table");
    let _ = writeln!(out, "   - Rename columns that fail the identifier grammar");
    let _ = writeln!(out);
    let _ = writeln!(out, "3. Date columns:");
    let _ = writeln!(out, "   - Values must be YYYY-MM-DD or YYYY-MM-DD HH:MM:SS");
    let _ = writeln!(out);
    let _ = writeln!(out, "4. Before importing:");
    let _ = writeln!(out, "   - Create the table structure first, then load the data");
    let _ = writeln!(out, "   - Set primary and foreign key constraints explicitly");
    let _ = writeln!(out, "   - Re-check key uniqueness on tables flagged above");
}
