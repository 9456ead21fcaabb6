//! pipeline.rs - The streaming sanitization orchestrator.
//!
//! A [`Pipeline`] drives each log line through the three redaction stages in
//! fixed order: regex rules, then the sensitive-term denylist, then the
//! optional advanced PII analyzer. Lines are processed one at a time through
//! a resumable iterator, so arbitrarily large logs never need to be fully
//! materialized and a caller can abandon a run between lines.
//!
//! All pipeline state is constructed up front and immutable afterwards; the
//! only per-run mutation is the statistics accumulator owned by the iterator.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::compiler::{compile_rules, CompiledRules};
use crate::config::RedactionConfig;
use crate::errors::ScrubError;
use crate::pii::{apply_findings, PiiAnalyzer};
use crate::redaction::loggable_content;
use crate::stats::{count_placeholders, FileReport, RuleSummary, ScrubStats};
use crate::terms::TermSet;

/// Interval, in lines, between progress log messages during file runs.
const PROGRESS_LOG_INTERVAL: usize = 10_000;

/// Tuning knobs for a pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Truncate processing to the first N lines (preview/testing use).
    pub max_lines: Option<usize>,
    /// Strip ANSI escape sequences before matching. Build consoles are full
    /// of color codes that would otherwise split secrets across matches.
    pub strip_ansi: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self { max_lines: None, strip_ansi: true }
    }
}

/// A fully-constructed sanitization pipeline.
///
/// Construction compiles every rule; a pipeline that fails to construct is
/// never partially usable. The compiled rules sit behind an `Arc` and may be
/// shared read-only across concurrent pipeline instances.
pub struct Pipeline {
    rules: Arc<CompiledRules>,
    terms: TermSet,
    analyzer: Option<Box<dyn PiiAnalyzer>>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Builds a pipeline without the advanced PII capability.
    pub fn new(
        config: &RedactionConfig,
        terms: TermSet,
        options: PipelineOptions,
    ) -> Result<Self, ScrubError> {
        let rules = Arc::new(compile_rules(config)?);
        Ok(Self { rules, terms, analyzer: None, options })
    }

    /// Builds a pipeline with an injected PII analyzer. If the analyzer
    /// reports itself unavailable, the PII stage is a no-op.
    pub fn with_analyzer(
        config: &RedactionConfig,
        terms: TermSet,
        analyzer: Box<dyn PiiAnalyzer>,
        options: PipelineOptions,
    ) -> Result<Self, ScrubError> {
        let mut pipeline = Self::new(config, terms, options)?;
        pipeline.analyzer = Some(analyzer);
        Ok(pipeline)
    }

    /// Returns the compiled rules used by this pipeline.
    pub fn compiled_rules(&self) -> &CompiledRules {
        &self.rules
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Normalizes a raw line for matching (ANSI stripping, when enabled).
    /// Statistics compare against this form so they reflect redactions only.
    fn prepare_line(&self, raw: &str) -> String {
        if self.options.strip_ansi && raw.contains('\u{1b}') {
            String::from_utf8_lossy(&strip_ansi_escapes::strip(raw.as_bytes())).into_owned()
        } else {
            raw.to_string()
        }
    }

    /// Runs the three stages over one prepared line.
    fn sanitize_prepared(
        &self,
        line_number: usize,
        line: &str,
        counts: Option<&mut [usize]>,
    ) -> String {
        // Blank lines are common in build logs and never carry secrets.
        if line.trim().is_empty() {
            return line.to_string();
        }

        let after_regex = match counts {
            Some(counts) => self.rules.apply_counting(line, counts),
            None => self.rules.apply(line),
        };
        let after_terms = self.terms.apply(&after_regex);
        self.apply_pii_stage(line_number, after_terms)
    }

    fn apply_pii_stage(&self, line_number: usize, line: String) -> String {
        let Some(analyzer) = &self.analyzer else {
            return line;
        };
        if !analyzer.available() {
            return line;
        }

        match analyzer.analyze(&line) {
            Ok(findings) if !findings.is_empty() => apply_findings(&line, findings),
            Ok(_) => line,
            Err(e) => {
                // One line's analysis failure must never abort the run.
                warn!(
                    "PII analysis failed on line {}; passing line through unchanged: {:#}",
                    line_number, e
                );
                line
            }
        }
    }

    /// Sanitizes a single line. `line_number` is only used for diagnostics.
    pub fn sanitize_line(&self, line_number: usize, raw: &str) -> String {
        let prepared = self.prepare_line(raw);
        self.sanitize_prepared(line_number, &prepared, None)
    }

    /// Wraps a line source in a sanitizing iterator. Lines are pulled,
    /// redacted, and counted one at a time; dropping the iterator abandons
    /// the run cleanly.
    pub fn sanitize_lines<I>(&self, lines: I) -> SanitizedLines<'_, I>
    where
        I: Iterator,
        I::Item: AsRef<str>,
    {
        SanitizedLines {
            pipeline: self,
            lines,
            stats: ScrubStats::default(),
            line_number: 0,
        }
    }

    /// Whole-string convenience mode: split on newlines, sanitize, rejoin.
    /// Produces the same per-line output as the streaming mode.
    pub fn sanitize_text(&self, text: &str) -> (String, ScrubStats) {
        let mut lines = self.sanitize_lines(text.lines());
        let mut out = String::with_capacity(text.len());
        let mut first = true;
        for line in lines.by_ref() {
            if !first {
                out.push('\n');
            }
            out.push_str(&line);
            first = false;
        }
        if text.ends_with('\n') {
            out.push('\n');
        }
        (out, lines.stats())
    }

    /// Scans text without producing output: full statistics plus per-rule
    /// occurrence counts.
    pub fn scan_text(&self, text: &str) -> (ScrubStats, Vec<RuleSummary>) {
        let mut counts = vec![0usize; self.rules.rules.len()];
        let mut stats = ScrubStats::default();
        let mut line_number = 0usize;

        for raw in text.lines() {
            if let Some(max) = self.options.max_lines {
                if line_number >= max {
                    break;
                }
            }
            line_number += 1;
            let prepared = self.prepare_line(raw);
            let sanitized = self.sanitize_prepared(line_number, &prepared, Some(&mut counts));
            let modified = sanitized != prepared;
            stats.record(modified, if modified { count_placeholders(&sanitized) } else { 0 });
        }

        let summary = self
            .rules
            .rules
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(rule, occurrences)| RuleSummary { rule_name: rule.name.clone(), occurrences })
            .collect();
        (stats, summary)
    }

    /// Streams `input` to `output` line by line, decoding best-effort (invalid
    /// UTF-8 is replaced, never fatal) and writing through a sibling temp file
    /// that is renamed into place only on success.
    pub fn sanitize_file(&self, input: &Path, output: &Path) -> Result<FileReport, ScrubError> {
        let input_bytes = fs::metadata(input)?.len();
        let reader = BufReader::new(File::open(input)?);

        let tmp_path = match output.file_name() {
            Some(name) => {
                let mut name = name.to_os_string();
                name.push(".tmp");
                output.with_file_name(name)
            }
            None => {
                return Err(ScrubError::Fatal(format!(
                    "Output path {} has no file name",
                    output.display()
                )))
            }
        };

        let stats = match self.write_sanitized(reader, &tmp_path) {
            Ok(stats) => stats,
            Err(e) => {
                let _ = fs::remove_file(&tmp_path);
                return Err(e);
            }
        };

        fs::rename(&tmp_path, output)?;
        let output_bytes = fs::metadata(output)?.len();

        info!(
            "Sanitized {} -> {}: {} lines, {} modified, {} redactions",
            input.display(),
            output.display(),
            stats.total_lines,
            stats.modified_lines,
            stats.redacted_items
        );

        Ok(FileReport {
            lines_processed: stats.total_lines,
            lines_modified: stats.modified_lines,
            redacted_items: stats.redacted_items,
            modification_ratio: stats.modification_ratio(),
            input_bytes,
            output_bytes,
        })
    }

    fn write_sanitized<R: BufRead>(&self, mut reader: R, tmp: &Path) -> Result<ScrubStats, ScrubError> {
        let mut writer = BufWriter::new(File::create(tmp)?);
        let mut stats = ScrubStats::default();
        let mut line_number = 0usize;
        let mut buf = Vec::new();

        loop {
            if let Some(max) = self.options.max_lines {
                if line_number >= max {
                    break;
                }
            }
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            while matches!(buf.last(), Some(b'\n') | Some(b'\r')) {
                buf.pop();
            }
            let raw = String::from_utf8_lossy(&buf);

            line_number += 1;
            let prepared = self.prepare_line(&raw);
            let sanitized = self.sanitize_prepared(line_number, &prepared, None);
            let modified = sanitized != prepared;
            stats.record(modified, if modified { count_placeholders(&sanitized) } else { 0 });

            writer.write_all(sanitized.as_bytes())?;
            writer.write_all(b"\n")?;

            if line_number % PROGRESS_LOG_INTERVAL == 0 {
                info!("Processed {} lines", line_number);
            }
        }

        writer.flush()?;
        Ok(stats)
    }
}

/// A sanitizing iterator over a line source. See [`Pipeline::sanitize_lines`].
pub struct SanitizedLines<'p, I> {
    pipeline: &'p Pipeline,
    lines: I,
    stats: ScrubStats,
    line_number: usize,
}

impl<I> SanitizedLines<'_, I> {
    /// Statistics accumulated so far; complete once the iterator is drained.
    pub fn stats(&self) -> ScrubStats {
        self.stats
    }
}

impl<I> Iterator for SanitizedLines<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(max) = self.pipeline.options.max_lines {
            if self.line_number >= max {
                return None;
            }
        }
        let raw = self.lines.next()?;
        self.line_number += 1;

        let prepared = self.pipeline.prepare_line(raw.as_ref());
        let sanitized = self.pipeline.sanitize_prepared(self.line_number, &prepared, None);
        let modified = sanitized != prepared;
        if modified {
            debug!(
                "Line {} modified (was: '{}')",
                self.line_number,
                loggable_content(&prepared)
            );
        }
        self.stats
            .record(modified, if modified { count_placeholders(&sanitized) } else { 0 });
        Some(sanitized)
    }
}
