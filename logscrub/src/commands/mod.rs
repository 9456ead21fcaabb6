//! Command implementations and the shared plumbing they sit on.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use logscrub_core::{Pipeline, PipelineOptions, RedactionConfig, TermSet};

pub mod sanitize;
pub mod scan;

/// Builds a pipeline from the shared `--config`/`--terms` arguments.
pub(crate) fn build_pipeline(
    config_path: Option<&Path>,
    terms_path: Option<&Path>,
    max_lines: Option<usize>,
    keep_ansi: bool,
) -> Result<Pipeline> {
    let config = match config_path {
        Some(path) => RedactionConfig::load_from_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => RedactionConfig::load_default_rules()?,
    };

    // A broken terms file degrades to an empty set inside load_from_file; a
    // broken rules file is fatal above. Terms are additive, rules are not.
    let terms = match terms_path {
        Some(path) => TermSet::load_from_file(path),
        None => TermSet::default(),
    };

    let options = PipelineOptions { max_lines, strip_ansi: !keep_ansi };
    let pipeline = Pipeline::new(&config, terms, options)?;
    Ok(pipeline)
}

/// Reads the whole input from a file or stdin, decoding best-effort so a
/// stray invalid byte in a build log never aborts the run.
pub(crate) fn read_input(input_file: Option<&Path>) -> Result<String> {
    let bytes = match input_file {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
