// logscrub-core/src/lib.rs
//! # logscrub Core Library
//!
//! `logscrub-core` provides the platform-independent logic for sanitizing CI
//! build logs before they reach any external system (a hosted language
//! model, email, a chat webhook). It implements a multi-stage, streaming
//! redaction pipeline: an ordered set of compiled regex rules, an
//! organization-specific sensitive-term denylist, and an optional advanced
//! PII stage behind a pluggable capability trait.
//!
//! The library is pure and stateless: a [`Pipeline`] is constructed once
//! from immutable rule and term sets and then applied to any number of logs;
//! per-run state is limited to the statistics accumulator owned by each
//! invocation.
//!
//! ## Modules
//!
//! * `config`: Defines [`RedactionRule`]s and [`RedactionConfig`] for specifying sensitive patterns.
//! * `compiler`: Compiles a rule set into [`CompiledRules`] ready for application.
//! * `terms`: The exact-match sensitive-term denylist ([`TermSet`]).
//! * `pii`: The pluggable [`PiiAnalyzer`] capability and offset-safe splicing.
//! * `pipeline`: The streaming orchestrator driving lines through the stages.
//! * `stats`: Statistics and report types ([`ScrubStats`], [`FileReport`]).
//! * `redaction`: Helpers that keep sensitive content out of debug logs.
//! * `errors`: The [`ScrubError`] type for construction and I/O failures.
//!
//! ## Usage Example
//!
//! ```rust
//! use logscrub_core::{Pipeline, PipelineOptions, RedactionConfig, TermSet};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = RedactionConfig::load_default_rules()?;
//!     let pipeline = Pipeline::new(&config, TermSet::default(), PipelineOptions::default())?;
//!
//!     let log = "Authentication failed with password=SuperSecret123\n\
//!                Contact admin@example.com for access\n";
//!     let (sanitized, stats) = pipeline.sanitize_text(log);
//!
//!     assert!(sanitized.contains("[PASSWORD_REDACTED]"));
//!     assert!(sanitized.contains("[EMAIL_REDACTED]"));
//!     assert!(!sanitized.contains("SuperSecret123"));
//!     assert_eq!(stats.total_lines, 2);
//!     assert_eq!(stats.modified_lines, 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Construction-time misconfiguration (an invalid rule pattern) is the only
//! failure a caller must handle defensively; it is surfaced as a
//! [`ScrubError`] and leaves no partially-usable pipeline. Per-line failures
//! in the advanced PII stage are recovered locally and logged. A successful
//! run never fails for "nothing sensitive found".

pub mod compiler;
pub mod config;
pub mod errors;
pub mod pii;
pub mod pipeline;
pub mod redaction;
pub mod stats;
pub mod terms;

pub use compiler::{compile_rules, CompiledRule, CompiledRules};
pub use config::{RedactionConfig, RedactionRule, MAX_PATTERN_LENGTH};
pub use errors::ScrubError;
pub use pii::{apply_findings, PiiAnalyzer, PiiFinding};
pub use pipeline::{Pipeline, PipelineOptions, SanitizedLines};
pub use redaction::redact_sensitive;
pub use stats::{count_placeholders, FileReport, RuleSummary, ScrubStats};
pub use terms::{TermSet, SENSITIVE_TERM_PLACEHOLDER};
