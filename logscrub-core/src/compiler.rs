//! compiler.rs - Compiles redaction rules into their matchable form.
//!
//! This module converts a `RedactionConfig` into `CompiledRules`, which are
//! optimized for repeated application to log lines. Compilation happens once
//! at pipeline construction; the result is immutable and safely shareable
//! across concurrent pipeline instances behind an `Arc`.

use log::{debug, warn};
use regex::RegexBuilder;

use crate::config::{RedactionConfig, MAX_PATTERN_LENGTH};
use crate::errors::ScrubError;

/// Represents a single compiled redaction rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: regex::Regex,
    /// The placeholder substituted for every match, derived from the rule name.
    pub placeholder: String,
    /// The unique name of the redaction rule.
    pub name: String,
}

/// The full, ordered set of compiled rules for a pipeline.
#[derive(Debug, Default)]
pub struct CompiledRules {
    /// Compiled rules in application order.
    pub rules: Vec<CompiledRule>,
}

impl CompiledRules {
    /// Applies every rule to `line` in order, replacing all non-overlapping
    /// matches of each rule with its placeholder before moving to the next.
    ///
    /// Each rule sees the output of the previous rule, not the pristine
    /// input. This sequential-mutation semantic decides which category label
    /// ends up on a span when several rules could match it.
    pub fn apply(&self, line: &str) -> String {
        let mut current = line.to_string();
        for rule in &self.rules {
            if rule.regex.is_match(&current) {
                current = rule
                    .regex
                    .replace_all(&current, rule.placeholder.as_str())
                    .into_owned();
            }
        }
        current
    }

    /// Same as [`apply`](Self::apply), additionally recording how many matches
    /// each rule replaced. `counts` must have one slot per rule, in rule order.
    pub fn apply_counting(&self, line: &str, counts: &mut [usize]) -> String {
        debug_assert_eq!(counts.len(), self.rules.len());
        let mut current = line.to_string();
        for (i, rule) in self.rules.iter().enumerate() {
            let occurrences = rule.regex.find_iter(&current).count();
            if occurrences > 0 {
                counts[i] += occurrences;
                current = rule
                    .regex
                    .replace_all(&current, rule.placeholder.as_str())
                    .into_owned();
            }
        }
        current
    }
}

/// Compiles a `RedactionConfig` into `CompiledRules`.
///
/// Patterns that already carry an inline `(?i)` flag compile without the
/// global case-insensitive flag; everything else compiles case-insensitively.
/// All patterns compile with dot-matches-newline semantics so secrets spanning
/// embedded newlines are still caught when a caller feeds multi-line chunks.
pub fn compile_rules(config: &RedactionConfig) -> Result<CompiledRules, ScrubError> {
    debug!("Starting compilation of {} rules.", config.rules.len());

    let mut compiled_rules = Vec::with_capacity(config.rules.len());
    let mut compilation_errors = Vec::new();

    for rule in &config.rules {
        if rule.pattern.is_empty() {
            warn!("Skipping rule '{}' because its pattern is empty.", rule.name);
            continue;
        }

        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(ScrubError::PatternLengthExceeded(
                rule.name.clone(),
                rule.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        // An inline flag plus a global flag is a conflict in some engines and
        // a silent double-application in others; detect and compile once.
        let has_inline_flag = rule.pattern.contains("(?i)");

        let regex_result = RegexBuilder::new(&rule.pattern)
            .case_insensitive(!has_inline_flag)
            .dot_matches_new_line(true)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        match regex_result {
            Ok(regex) => {
                debug!(target: "logscrub_core::compiler", "Rule '{}' compiled successfully.", rule.name);
                compiled_rules.push(CompiledRule {
                    regex,
                    placeholder: rule.placeholder(),
                    name: rule.name.clone(),
                });
            }
            Err(e) => {
                compilation_errors.push(ScrubError::RuleCompilation(rule.name.clone(), e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(ScrubError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
        Ok(CompiledRules { rules: compiled_rules })
    }
}
