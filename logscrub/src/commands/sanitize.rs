//! Sanitize command implementation: redact an input and emit the result.

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use log::info;

use crate::cli::SanitizeCommand;
use crate::commands::{build_pipeline, read_input};

pub fn run(args: &SanitizeCommand, quiet: bool) -> Result<()> {
    let pipeline = build_pipeline(
        args.config.as_deref(),
        args.terms.as_deref(),
        args.max_lines,
        args.keep_ansi,
    )?;

    // File-to-file runs stream through the core without materializing the
    // log; every other combination goes through whole-string mode.
    if let (Some(input), Some(output)) = (args.input_file.as_deref(), args.output.as_deref()) {
        let report = pipeline.sanitize_file(input, output)?;
        if !args.no_summary && !quiet {
            eprintln!("--- Sanitization Summary ---");
            eprintln!("Lines processed:  {}", report.lines_processed);
            eprintln!(
                "Lines modified:   {} ({:.1}%)",
                report.lines_modified,
                report.modification_ratio * 100.0
            );
            eprintln!("Items redacted:   {}", report.redacted_items);
            eprintln!(
                "Bytes:            {} in, {} out",
                report.input_bytes, report.output_bytes
            );
        }
        return Ok(());
    }

    let input = read_input(args.input_file.as_deref())?;
    let (sanitized, stats) = pipeline.sanitize_text(&input);

    match args.output.as_deref() {
        Some(path) => {
            info!("Writing sanitized content to {}", path.display());
            fs::write(path, sanitized.as_bytes())
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writer.write_all(sanitized.as_bytes())?;
            writer.flush()?;
        }
    }

    if !args.no_summary && !quiet {
        eprintln!("--- Sanitization Summary ---");
        eprintln!("Lines processed:  {}", stats.total_lines);
        eprintln!(
            "Lines modified:   {} ({:.1}%)",
            stats.modified_lines,
            stats.modification_ratio() * 100.0
        );
        eprintln!("Items redacted:   {}", stats.redacted_items);
    }

    Ok(())
}
