//! Rule tables driving identifier vetting and checker dispatch.
//!
//! The defaults target MySQL. Every table is plain data so a different
//! target database's grammar can be swapped in from a YAML file
//! (`csv-compat rules -o my-rules.yml`, edit, then `check --rules`).

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Keywords that require quoting when used as identifiers.
    pub reserved_words: Vec<String>,
    /// Column-name substrings that mark a column as date/time-typed.
    pub date_keywords: Vec<String>,
    /// Column-name substrings that mark a column as numeric-typed.
    pub numeric_keywords: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            reserved_words: to_strings(&[
                "order",
                "group",
                "select",
                "table",
                "index",
                "key",
                "user",
                "database",
                "schema",
                "view",
                "trigger",
                "procedure",
                "function",
            ]),
            date_keywords: to_strings(&["date", "time"]),
            numeric_keywords: to_strings(&[
                "quantity", "amount", "price", "rate", "count", "capacity", "revenue", "year",
            ]),
        }
    }
}

impl RuleSet {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Opening rules file {path:?}"))?;
        serde_yaml::from_str(&raw).with_context(|| format!("Parsing rules YAML {path:?}"))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let rendered = self.to_yaml()?;
        fs::write(path, rendered).with_context(|| format!("Writing rules file {path:?}"))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Rendering rules YAML")
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words
            .iter()
            .any(|word| word.eq_ignore_ascii_case(name))
    }

    /// Substring keyword matching is deliberately fuzzy: `order_date`,
    /// `CreatedTime`, and `update_timestamp` all classify as date-like.
    pub fn is_date_column(&self, name: &str) -> bool {
        contains_keyword(name, &self.date_keywords)
    }

    pub fn is_numeric_column(&self, name: &str) -> bool {
        contains_keyword(name, &self.numeric_keywords)
    }
}

fn contains_keyword(name: &str, keywords: &[String]) -> bool {
    let lowered = name.to_lowercase();
    keywords
        .iter()
        .any(|keyword| lowered.contains(&keyword.to_lowercase()))
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}
