//! terms.rs - Organization-specific sensitive-term redaction.
//!
//! A `TermSet` is an exact-match denylist of sensitive vocabulary, distinct
//! from the regex rules: terms are literal strings (regex metacharacters are
//! escaped), partitioned into case-sensitive and case-insensitive subsets,
//! and every occurrence is replaced with one fixed generic placeholder.
//!
//! The denylist is supplementary: a missing or malformed terms file is
//! logged and treated as an empty set, never a construction failure.

use log::{info, warn};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::path::Path;

/// The fixed placeholder substituted for every denylisted term.
pub const SENSITIVE_TERM_PLACEHOLDER: &str = "[SENSITIVE_TERM_REDACTED]";

/// On-disk shape of the denylist file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TermsFile {
    case_insensitive: Vec<String>,
    case_sensitive: Vec<String>,
}

/// A compiled set of sensitive terms, immutable after construction.
#[derive(Debug, Default)]
pub struct TermSet {
    case_sensitive: Vec<String>,
    case_insensitive: Vec<Regex>,
}

impl TermSet {
    /// Builds a term set from plain string lists. Terms are matched literally;
    /// any regex metacharacters are escaped.
    pub fn from_lists(case_insensitive: Vec<String>, case_sensitive: Vec<String>) -> Self {
        let compiled = case_insensitive
            .iter()
            .filter(|t| !t.is_empty())
            .filter_map(|term| {
                match RegexBuilder::new(&regex::escape(term)).case_insensitive(true).build() {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!("Skipping sensitive term {:?}: {}", term, e);
                        None
                    }
                }
            })
            .collect();

        Self {
            case_sensitive: case_sensitive.into_iter().filter(|t| !t.is_empty()).collect(),
            case_insensitive: compiled,
        }
    }

    /// Loads a term set from a JSON denylist file with two keys,
    /// `case_insensitive` and `case_sensitive`, each an array of strings.
    ///
    /// Errors are non-fatal: an unreadable or malformed file yields an empty
    /// set so the pipeline still runs with its regex rules.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Sensitive terms file {} not readable: {}", path.display(), e);
                return Self::default();
            }
        };

        let parsed: TermsFile = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Failed to parse sensitive terms file {}: {}", path.display(), e);
                return Self::default();
            }
        };

        let set = Self::from_lists(parsed.case_insensitive, parsed.case_sensitive);
        info!(
            "Loaded {} case-insensitive and {} case-sensitive sensitive terms from {}",
            set.case_insensitive.len(),
            set.case_sensitive.len(),
            path.display()
        );
        set
    }

    pub fn len(&self) -> usize {
        self.case_sensitive.len() + self.case_insensitive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces every occurrence of a denylisted term in `line` with the
    /// generic placeholder, preserving the surrounding text exactly.
    pub fn apply(&self, line: &str) -> String {
        if self.is_empty() {
            return line.to_string();
        }

        let mut current = line.to_string();

        for term in &self.case_sensitive {
            if current.contains(term.as_str()) {
                current = current.replace(term.as_str(), SENSITIVE_TERM_PLACEHOLDER);
            }
        }

        for term in &self.case_insensitive {
            if term.is_match(&current) {
                current = term
                    .replace_all(&current, SENSITIVE_TERM_PLACEHOLDER)
                    .into_owned();
            }
        }

        current
    }
}
