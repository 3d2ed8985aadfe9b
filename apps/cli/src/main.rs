//! Vidsplit CLI - dataset manifest generation for video classification
//!
//! This CLI provides a `vidsplit` command that scans a label-partitioned
//! directory tree and writes the train/val/test manifests consumed by the
//! training pipeline.

mod commands;
mod config;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, shells};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::generate::GenerateArgs;

/// Vidsplit CLI - train/val/test manifests for labeled video folders
#[derive(Parser, Debug)]
#[command(
    name = "vidsplit",
    author,
    version,
    about = "Vidsplit - dataset manifests for video classification",
    long_about = "Vidsplit scans one directory per class label, shuffles each class and splits it 2:1:1 into\ntrain.csv, val.csv and test.csv (one `<path> <label_index>` line per file)."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Config file (skips discovery of ~/.vidsplit/config.toml and ./vidsplit.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate train/val/test manifests
    ///
    /// Scans `<root>/<label>` for every configured label, shuffles each label's
    /// files and writes them 2:1:1 into train.csv, val.csv and test.csv.
    Generate(GenerateArgs),

    /// Summarize existing manifests
    ///
    /// Reads train.csv, val.csv and test.csv and prints per-split and
    /// per-label counts plus the number of classes.
    Show {
        /// Directory holding the manifests (defaults to the configured output directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Output the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_level(level: &str) -> Level {
    match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> anyhow::Result<()> {
    // Handle completion generation
    if let Ok(shell) = std::env::var("VIDSPLIT_GENERATE_COMPLETIONS") {
        let mut cmd = Args::command();
        match shell.as_str() {
            "bash" => generate(shells::Bash, &mut cmd, "vidsplit", &mut std::io::stdout()),
            "zsh" => generate(shells::Zsh, &mut cmd, "vidsplit", &mut std::io::stdout()),
            "fish" => generate(shells::Fish, &mut cmd, "vidsplit", &mut std::io::stdout()),
            "powershell" => generate(shells::PowerShell, &mut cmd, "vidsplit", &mut std::io::stdout()),
            "elvish" => generate(shells::Elvish, &mut cmd, "vidsplit", &mut std::io::stdout()),
            _ => {
                eprintln!("Unknown shell: {}. Supported: bash, zsh, fish, powershell, elvish", shell);
                std::process::exit(1);
            }
        };
        return Ok(());
    }

    let args = Args::parse();

    let cli_config = config::load_config(args.config.as_deref())?;

    // CLI flag, then config file, then default
    let level = args.log_level.as_deref().or(cli_config.log_level.as_deref()).map_or(Level::INFO, parse_level);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Generate(generate_args) => {
            commands::generate::execute(cli_config, generate_args)?;
        }
        Command::Show { dir, json } => {
            commands::show::execute(&cli_config, dir, json)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_level_falls_back_to_info() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("loud"), Level::INFO);
    }
}
