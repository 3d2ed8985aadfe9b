//! Manifest summary command.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use vidsplit_manifest::{summarize, ManifestLayout, VidsplitConfig};

pub fn execute(config: &VidsplitConfig, dir: Option<PathBuf>, json_output: bool) -> Result<()> {
    let layout = dir
        .or_else(|| config.output_dir.clone())
        .map_or_else(ManifestLayout::current_dir, ManifestLayout::new);

    let summary = summarize(&layout)
        .with_context(|| format!("Failed to read manifests in {}", layout.dir().display()))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("{}", format!("Manifests ({})", layout.dir().display()).bold().cyan());
    println!();

    for split in &summary.splits {
        println!("  {:<6} {} entries", split.split.as_str().cyan(), split.lines);
        for (index, count) in &split.per_label {
            println!("    {}", format!("label {index}: {count}").dimmed());
        }
    }

    println!();
    println!("  Total entries: {}", summary.total_entries);
    println!("  Classes: {}", summary.num_classes);

    if !summary.overlaps.is_empty() {
        println!();
        println!(
            "  {}",
            format!("{} entries appear in more than one manifest:", summary.overlaps.len()).yellow()
        );
        for path in summary.overlaps.iter().take(10) {
            println!("    {}", path);
        }
    }
    println!();
    Ok(())
}
