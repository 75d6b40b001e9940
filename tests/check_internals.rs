//! Library-level tests that exercise the per-file evaluator directly, plus
//! property tests over the identifier grammar and numeric lexing.

mod common;

use csv_compat::{check::check_file, checks, identifier::validate_field_names, rules::RuleSet};
use encoding_rs::UTF_8;
use proptest::prelude::*;

use common::TestWorkspace;

#[test]
fn check_file_populates_counts_and_verdict() {
    let ws = TestWorkspace::new();
    let path = ws.write(
        "orders.csv",
        "id,order_date,amount\n1,2024-01-01,10\n2,2024-01-02,20\n",
    );
    let result = check_file(&path, b',', UTF_8, &RuleSet::default());

    assert_eq!(result.file_name, "orders.csv");
    assert_eq!(result.table_name, "orders");
    assert_eq!(result.encoding, "UTF-8");
    assert_eq!(result.field_count, 3);
    assert_eq!(result.record_count, 2);
    assert!(result.field_issues.is_empty());
    assert!(result.data_issues.is_empty());
    assert_eq!(result.key_finding, None);
    assert!(result.compatible);
}

#[test]
fn mid_scan_decode_failure_keeps_partial_tallies() {
    let ws = TestWorkspace::new();
    let path = ws.write_bytes("broken.csv", b"id,name\n1,ok\n2,caf\xE9\n3,ok\n");
    let result = check_file(&path, b',', UTF_8, &RuleSet::default());

    assert!(!result.compatible);
    assert!(
        result
            .field_issues
            .iter()
            .any(|issue| issue.starts_with("encoding error"))
    );
    // The row read before the failure is still counted.
    assert_eq!(result.record_count, 1);
}

#[test]
fn ten_retained_issues_keep_the_file_compatible() {
    let ws = TestWorkspace::new();
    let mut body = String::from("id,date_a,date_b\n");
    for i in 1..=5 {
        body.push_str(&format!("{i},bad,bad\n"));
    }
    let path = ws.write("edge.csv", &body);
    let result = check_file(&path, b',', UTF_8, &RuleSet::default());

    assert_eq!(result.data_issues.len(), 10);
    assert!(result.compatible);
}

#[test]
fn more_than_ten_retained_issues_flip_the_verdict() {
    let ws = TestWorkspace::new();
    let mut body = String::from("id,date_a,date_b,date_c\n");
    for i in 1..=4 {
        body.push_str(&format!("{i},bad,bad,bad\n"));
    }
    let path = ws.write("edge.csv", &body);
    let result = check_file(&path, b',', UTF_8, &RuleSet::default());

    assert_eq!(result.data_issues.len(), 12);
    assert!(result.field_issues.is_empty());
    assert!(!result.compatible);
}

proptest! {
    // Any name that satisfies the unquoted-identifier grammar and is not a
    // reserved word must pass the validator untouched.
    #[test]
    fn grammar_clean_unreserved_names_raise_no_issues(name in "[A-Za-z_][A-Za-z0-9_]{0,15}") {
        let rules = RuleSet::default();
        prop_assume!(!rules.is_reserved(&name));
        let issues = validate_field_names(std::slice::from_ref(&name), &rules);
        prop_assert!(issues.is_empty(), "unexpected issues for '{name}': {issues:?}");
    }

    #[test]
    fn well_grouped_numerals_are_never_flagged(
        head in 1..=999u32,
        groups in proptest::collection::vec(0..=999u32, 0..4),
        fraction in proptest::option::of(0..=99u32),
    ) {
        let mut value = head.to_string();
        for group in groups {
            value.push_str(&format!(",{group:03}"));
        }
        if let Some(fraction) = fraction {
            value.push_str(&format!(".{fraction}"));
        }
        prop_assert!(checks::check_numeric_format(&value, "amount").is_none());
    }
}
