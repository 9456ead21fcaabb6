//! pii.rs - The pluggable advanced PII detection capability.
//!
//! Regex rules catch structured secrets; free-form PII (names, addresses)
//! needs a natural-language analyzer. That analyzer is an external system
//! with unbounded latency and its own failure modes, so the core depends on
//! it only through the [`PiiAnalyzer`] trait. Absence of the capability is a
//! first-class state: a pipeline built without an analyzer simply skips this
//! stage.

use anyhow::Result;
use log::warn;

/// A detected PII span within a single line. Half-open byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiiFinding {
    /// Entity category reported by the analyzer (e.g., "PERSON", "LOCATION").
    pub entity_type: String,
    pub start: usize,
    pub end: usize,
}

/// Capability interface for an external natural-language PII detector.
///
/// Implementations wrap whatever NLP engine is configured. The pipeline
/// checks [`available`](Self::available) before every call and treats any
/// `analyze` error as "no findings for this line".
pub trait PiiAnalyzer: Send + Sync {
    /// Whether the underlying engine loaded and is ready to analyze text.
    fn available(&self) -> bool;

    /// Analyzes a single line and returns the PII spans found in it.
    fn analyze(&self, line: &str) -> Result<Vec<PiiFinding>>;
}

/// Splices placeholders over `findings` in `line`.
///
/// Findings are processed in strictly descending `start` order so that
/// replacements near the end of the line never invalidate the byte offsets
/// of findings closer to the front. Ascending order would corrupt offsets as
/// soon as a placeholder differs in length from the span it replaces.
pub fn apply_findings(line: &str, mut findings: Vec<PiiFinding>) -> String {
    findings.sort_by(|a, b| b.start.cmp(&a.start));

    let mut out = line.to_string();
    for finding in findings {
        if finding.start > finding.end
            || finding.end > out.len()
            || !out.is_char_boundary(finding.start)
            || !out.is_char_boundary(finding.end)
        {
            warn!(
                "Skipping PII finding '{}' with invalid span {}..{}",
                finding.entity_type, finding.start, finding.end
            );
            continue;
        }
        let placeholder = format!("[{}_REDACTED]", finding.entity_type);
        out.replace_range(finding.start..finding.end, &placeholder);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(entity: &str, start: usize, end: usize) -> PiiFinding {
        PiiFinding { entity_type: entity.to_string(), start, end }
    }

    #[test]
    fn single_finding_is_spliced() {
        let out = apply_findings("call Alice today", vec![finding("PERSON", 5, 10)]);
        assert_eq!(out, "call [PERSON_REDACTED] today");
    }

    #[test]
    fn adjacent_findings_redact_cleanly_in_descending_order() {
        // Two adjacent spans covering a 10-character line must yield exactly
        // two placeholders with no index corruption.
        let out = apply_findings("aaaaabbbbb", vec![finding("A", 0, 5), finding("B", 5, 10)]);
        assert_eq!(out, "[A_REDACTED][B_REDACTED]");

        // Input order must not matter; the splicer sorts internally.
        let out = apply_findings("aaaaabbbbb", vec![finding("B", 5, 10), finding("A", 0, 5)]);
        assert_eq!(out, "[A_REDACTED][B_REDACTED]");
    }

    #[test]
    fn ascending_order_splice_would_corrupt_offsets() {
        // Regression guard: demonstrate that the naive ascending splice is
        // wrong, and that apply_findings does not produce its output.
        let line = "aaaaabbbbb";
        let findings = vec![finding("A", 0, 5), finding("B", 5, 10)];

        let mut naive = line.to_string();
        for f in &findings {
            // Ascending-order replacement shifts every later offset once the
            // placeholder length differs from the span length.
            let end = f.end.min(naive.len());
            let start = f.start.min(end);
            naive.replace_range(start..end, &format!("[{}_REDACTED]", f.entity_type));
        }

        assert_ne!(naive, "[A_REDACTED][B_REDACTED]");
        assert_eq!(apply_findings(line, findings), "[A_REDACTED][B_REDACTED]");
    }

    #[test]
    fn out_of_bounds_findings_are_skipped() {
        let out = apply_findings("short", vec![finding("X", 2, 99), finding("Y", 0, 2)]);
        assert_eq!(out, "[Y_REDACTED]ort");
    }

    #[test]
    fn non_char_boundary_findings_are_skipped() {
        // "é" is two bytes; offset 1 falls inside it.
        let out = apply_findings("été", vec![finding("X", 1, 3)]);
        assert_eq!(out, "été");
    }

    #[test]
    fn no_findings_returns_line_unchanged() {
        assert_eq!(apply_findings("nothing here", vec![]), "nothing here");
    }
}
