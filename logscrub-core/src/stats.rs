//! stats.rs - Sanitization statistics and reporting types.
//!
//! Statistics are computed by comparing each line before and after the
//! redaction stages. `redacted_items` counts placeholder occurrences in the
//! sanitized text of modified lines, not matches in the original, so a line
//! carrying three placeholders contributes three items.

use serde::Serialize;

/// Aggregate statistics for one sanitization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrubStats {
    pub total_lines: usize,
    pub modified_lines: usize,
    pub redacted_items: usize,
}

impl ScrubStats {
    /// Fraction of lines that were modified, guarded against empty input.
    pub fn modification_ratio(&self) -> f64 {
        self.modified_lines as f64 / self.total_lines.max(1) as f64
    }

    pub(crate) fn record(&mut self, modified: bool, placeholders: usize) {
        self.total_lines += 1;
        if modified {
            self.modified_lines += 1;
            self.redacted_items += placeholders;
        }
    }
}

/// Counts redaction placeholders in a sanitized line.
pub fn count_placeholders(line: &str) -> usize {
    line.matches("_REDACTED]").count()
}

/// Per-rule occurrence counts, reported by scan mode. Deliberately carries no
/// matched text: the summary may travel further than the sanitized log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub rule_name: String,
    pub occurrences: usize,
}

/// Full report for a file-to-file sanitization run.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub lines_processed: usize,
    pub lines_modified: usize,
    pub redacted_items: usize,
    pub modification_ratio: f64,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_zero_on_empty_input() {
        let stats = ScrubStats::default();
        assert_eq!(stats.modification_ratio(), 0.0);
    }

    #[test]
    fn ratio_is_bounded() {
        let mut stats = ScrubStats::default();
        stats.record(true, 2);
        stats.record(false, 0);
        stats.record(true, 1);
        assert_eq!(stats.total_lines, 3);
        assert_eq!(stats.modified_lines, 2);
        assert_eq!(stats.redacted_items, 3);
        let ratio = stats.modification_ratio();
        assert!(ratio > 0.0 && ratio <= 1.0);
    }

    #[test]
    fn placeholder_counting_matches_emitted_markers() {
        assert_eq!(count_placeholders("clean line"), 0);
        assert_eq!(count_placeholders("[PASSWORD_REDACTED] and [EMAIL_REDACTED]"), 2);
        assert_eq!(count_placeholders("[SENSITIVE_TERM_REDACTED]"), 1);
    }
}
