//! Scan command implementation: count detections without emitting output.

use std::fs;

use anyhow::{bail, Context, Result};
use serde_json::json;

use crate::cli::ScanCommand;
use crate::commands::{build_pipeline, read_input};

pub fn run(args: &ScanCommand, quiet: bool) -> Result<()> {
    let pipeline = build_pipeline(
        args.config.as_deref(),
        args.terms.as_deref(),
        args.max_lines,
        false,
    )?;

    let input = read_input(args.input_file.as_deref())?;
    let (stats, summary) = pipeline.scan_text(&input);

    let report = json!({
        "total_lines": stats.total_lines,
        "modified_lines": stats.modified_lines,
        "redacted_items": stats.redacted_items,
        "modification_ratio": stats.modification_ratio(),
        "rules": summary,
    });

    if args.json_stdout {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(path) = args.json_file.as_deref() {
        fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
    } else if !quiet {
        println!("--- Scan Summary ---");
        println!("Lines scanned:   {}", stats.total_lines);
        println!(
            "Lines affected:  {} ({:.1}%)",
            stats.modified_lines,
            stats.modification_ratio() * 100.0
        );
        println!("Detections:      {}", stats.redacted_items);
        if summary.is_empty() {
            println!("No sensitive data detected.");
        } else {
            println!("Matches by rule:");
            for item in &summary {
                println!("  {:<24} {}", item.rule_name, item.occurrences);
            }
        }
    }

    if let Some(threshold) = args.fail_over_threshold {
        if stats.redacted_items > threshold {
            bail!(
                "Detected {} sensitive items, exceeding the threshold of {}",
                stats.redacted_items,
                threshold
            );
        }
    }

    Ok(())
}
