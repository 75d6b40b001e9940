//! Header vetting against the target database's identifier grammar.

use std::sync::OnceLock;

use regex::Regex;

use crate::rules::RuleSet;

static IDENTIFIER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn identifier_pattern() -> &'static Regex {
    IDENTIFIER_PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"))
}

/// Checks every header name against the unquoted-identifier grammar and the
/// rule set's reserved words.
///
/// All four checks run independently, so a single name can raise several
/// issues (a leading digit also fails the grammar check, for example). Names
/// are never trimmed: embedded or surrounding whitespace is itself a defect.
pub fn validate_field_names(fieldnames: &[String], rules: &RuleSet) -> Vec<String> {
    let mut issues = Vec::new();
    for field in fieldnames {
        if field.contains(' ') {
            issues.push(format!("field name contains whitespace: '{field}'"));
        }
        if field.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            issues.push(format!("field name starts with a digit: '{field}'"));
        }
        if !identifier_pattern().is_match(field) {
            issues.push(format!(
                "field name contains characters not allowed in an unquoted identifier: '{field}'"
            ));
        }
        if rules.is_reserved(field) {
            issues.push(format!(
                "field name is a reserved word: '{field}' (quote it when creating the table)"
            ));
        }
    }
    issues
}
