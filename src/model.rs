//! Per-file result model shared by the evaluator and the report renderers.

use serde::Serialize;

use crate::keys::KeyFinding;

/// Everything the checker learned about one file.
///
/// Built fresh per file in a single streaming pass, finalized by the verdict
/// rule, then handed to the report generator; never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub file_name: String,
    pub table_name: String,
    pub encoding: String,
    pub field_count: usize,
    pub record_count: usize,
    pub field_issues: Vec<String>,
    pub data_issues: Vec<String>,
    pub key_finding: Option<KeyFinding>,
    pub warnings: Vec<String>,
    pub compatible: bool,
}

impl CheckResult {
    pub fn new(file_name: String, table_name: String, encoding: &str) -> Self {
        Self {
            file_name,
            table_name,
            encoding: encoding.to_string(),
            field_count: 0,
            record_count: 0,
            field_issues: Vec::new(),
            data_issues: Vec::new(),
            key_finding: None,
            warnings: Vec::new(),
            compatible: true,
        }
    }
}
