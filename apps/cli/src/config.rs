//! CLI configuration loading and merging.

use anyhow::{Context, Result};
use std::path::Path;
use vidsplit_manifest::VidsplitConfig;

/// Load and merge CLI configuration.
///
/// Configuration precedence:
/// 1. CLI arguments (applied by each command)
/// 2. Explicit `--config` file, if given
/// 3. Local config file (./vidsplit.toml)
/// 4. Global config file (~/.vidsplit/config.toml)
/// 5. Defaults
pub fn load_config(explicit: Option<&Path>) -> Result<VidsplitConfig> {
    match explicit {
        Some(path) => VidsplitConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => VidsplitConfig::discover_and_load().context("Failed to load vidsplit configuration"),
    }
}
