//! Manifest generation command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use vidsplit_manifest::{
    GenerationReport, ManifestGenerator, NoopProgressSink, ProgressSink, Split, StdoutProgressSink, VidsplitConfig,
};

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Directory containing one subdirectory per label (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Directory to write train.csv, val.csv and test.csv to (default: current directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Seed for the per-label shuffle; omit for a fresh random split
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Label and its index, e.g. `--label door_closed=0` (repeatable, appended in order)
    #[arg(long = "label", value_name = "NAME=INDEX", value_parser = parse_label)]
    pub labels: Vec<(String, u32)>,

    /// Output the generation report as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_label(raw: &str) -> Result<(String, u32), String> {
    let (name, index) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=INDEX, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing label name in '{raw}'"));
    }
    let index = index
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid label index in '{raw}': {e}"))?;
    Ok((name.to_string(), index))
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(mut config: VidsplitConfig, args: &GenerateArgs) -> VidsplitConfig {
    for (name, index) in &args.labels {
        if !config.labels.contains(name) {
            config.labels.push(name.clone());
        }
        config.indexes.insert(name.clone(), *index);
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(ref root) = args.root {
        config.root = Some(root.clone());
    }
    if let Some(ref out) = args.out {
        config.output_dir = Some(out.clone());
    }
    config
}

pub fn execute(config: VidsplitConfig, args: GenerateArgs) -> Result<()> {
    let generator: ManifestGenerator = apply_overrides(config, &args).generator();

    let progress: &dyn ProgressSink = if args.json { &NoopProgressSink } else { &StdoutProgressSink };
    let report = generator.run(progress).context("Failed to generate manifests")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &GenerationReport) {
    println!();
    println!("{}", "Manifests written".bold().green());
    println!();
    println!("{:<8} {:>8}  {}", "Split", "Lines", "Path");
    println!("{}", "─".repeat(60));
    for split in Split::ALL {
        if let Some(artifact) = report.artifact(split) {
            println!(
                "{:<8} {:>8}  {}",
                split.as_str().cyan(),
                artifact.lines,
                artifact.path.display().to_string().dimmed()
            );
        }
    }
    println!();
    println!("  Labels: {}", report.groups.len());
    println!("  Total entries: {}", report.total_entries().to_string().cyan());
    match report.seed {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  {}", "Unseeded run; pass --seed to make the split reproducible.".dimmed()),
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label("door_closed=0").unwrap(), ("door_closed".to_string(), 0));
        assert_eq!(parse_label(" walk = 12 ").unwrap(), ("walk".to_string(), 12));
        assert!(parse_label("door_closed").is_err());
        assert!(parse_label("=1").is_err());
        assert!(parse_label("door=-1").is_err());
    }

    #[test]
    fn test_cli_labels_extend_config_labels() {
        let mut config = VidsplitConfig { labels: vec!["a".to_string()], seed: Some(1), ..Default::default() };
        config.indexes.insert("a".to_string(), 0);

        let args = GenerateArgs {
            labels: vec![("b".to_string(), 1), ("a".to_string(), 5)],
            seed: Some(9),
            out: Some(PathBuf::from("manifests")),
            ..Default::default()
        };

        let merged = apply_overrides(config, &args);
        assert_eq!(merged.labels, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(merged.indexes.get("a"), Some(&5));
        assert_eq!(merged.indexes.get("b"), Some(&1));
        assert_eq!(merged.seed, Some(9));
        assert_eq!(merged.output_dir, Some(PathBuf::from("manifests")));
        assert_eq!(merged.root, None);
    }

    #[test]
    fn test_overrides_keep_config_values_when_flags_absent() {
        let config = VidsplitConfig { seed: Some(3), root: Some(PathBuf::from("data")), ..Default::default() };
        let merged = apply_overrides(config.clone(), &GenerateArgs::default());
        assert_eq!(merged, config);
    }
}
