//! Configuration file support.
//!
//! A run is configured from TOML files discovered on disk, merged in order,
//! and finally overridden by command-line flags.

use crate::dataset::LabelSet;
use crate::error::{ManifestError, ManifestResult};
use crate::generator::ManifestGenerator;
use crate::layout::ManifestLayout;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Manifest generation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VidsplitConfig {
    /// Label directory names, in the order they are scanned.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Shuffle seed; unseeded runs are not reproducible.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Directory holding one subdirectory per label.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Directory the manifests are written to.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub log_level: Option<String>,

    /// Label name -> label index.
    #[serde(default)]
    pub indexes: BTreeMap<String, u32>,
}

impl VidsplitConfig {
    pub fn load_from_file(path: &Path) -> ManifestResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ManifestError::Config(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| ManifestError::Config(format!("{}: {}", path.display(), e)))
    }

    /// `~/.vidsplit/config.toml`
    pub fn default_global_path() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".vidsplit").join("config.toml")
    }

    pub fn default_local_path() -> PathBuf {
        PathBuf::from("vidsplit.toml")
    }

    /// Load the global config, then the local one on top of it.
    ///
    /// Missing files are skipped; unreadable or invalid ones are an error.
    pub fn discover_and_load() -> ManifestResult<Self> {
        Self::load_layered(&[Self::default_global_path(), Self::default_local_path()])
    }

    pub fn load_layered(paths: &[PathBuf]) -> ManifestResult<Self> {
        let mut config = Self::default();
        for path in paths {
            if !path.exists() {
                continue;
            }
            let layer = Self::load_from_file(path)?;
            tracing::debug!(path = %path.display(), "loaded config");
            config.merge(&layer);
        }
        Ok(config)
    }

    /// Merge another configuration into this one.
    ///
    /// A non-empty label list replaces the current one; indexes are merged key by key.
    pub fn merge(&mut self, other: &Self) {
        if !other.labels.is_empty() {
            self.labels = other.labels.clone();
        }
        self.indexes.extend(other.indexes.clone());
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        if let Some(ref root) = other.root {
            self.root = Some(root.clone());
        }
        if let Some(ref output_dir) = other.output_dir {
            self.output_dir = Some(output_dir.clone());
        }
        if let Some(ref log_level) = other.log_level {
            self.log_level = Some(log_level.clone());
        }
    }

    #[must_use]
    pub fn label_set(&self) -> LabelSet {
        LabelSet::new(self.labels.clone(), self.indexes.clone())
    }

    #[must_use]
    pub fn generator(&self) -> ManifestGenerator {
        let root = self.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let layout = self.output_dir.clone().map_or_else(ManifestLayout::current_dir, ManifestLayout::new);
        ManifestGenerator::new(root, self.label_set()).with_layout(layout).with_seed(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("vidsplit.toml");

        let config_content = r#"
labels = ["door_closed", "door_opened"]
seed = 42
root = "dataset"
log_level = "debug"

[indexes]
door_closed = 0
door_opened = 1
"#;
        std::fs::write(&config_path, config_content).unwrap();

        let config = VidsplitConfig::load_from_file(&config_path).unwrap();
        assert_eq!(config.labels, vec!["door_closed".to_string(), "door_opened".to_string()]);
        assert_eq!(config.indexes.get("door_opened"), Some(&1));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.root, Some(PathBuf::from("dataset")));
        assert_eq!(config.output_dir, None);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("vidsplit.toml");
        std::fs::write(&config_path, "labels = 3").unwrap();

        assert!(matches!(VidsplitConfig::load_from_file(&config_path), Err(ManifestError::Config(_))));
    }

    #[test]
    fn test_merge() {
        let mut base = VidsplitConfig {
            labels: vec!["a".to_string()],
            seed: Some(1),
            ..Default::default()
        };
        base.indexes.insert("a".to_string(), 0);

        let mut other = VidsplitConfig {
            labels: vec!["a".to_string(), "b".to_string()],
            output_dir: Some(PathBuf::from("out")),
            ..Default::default()
        };
        other.indexes.insert("b".to_string(), 1);

        base.merge(&other);
        assert_eq!(base.labels.len(), 2);
        assert_eq!(base.indexes.len(), 2);
        assert_eq!(base.seed, Some(1));
        assert_eq!(base.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_load_layered_skips_missing_and_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("global.toml");
        let local = temp_dir.path().join("local.toml");
        std::fs::write(&global, "seed = 1\nlabels = [\"a\"]\n[indexes]\na = 0\n").unwrap();
        std::fs::write(&local, "seed = 2\n").unwrap();

        let config = VidsplitConfig::load_layered(&[
            temp_dir.path().join("missing.toml"),
            global,
            local,
        ])
        .unwrap();

        assert_eq!(config.seed, Some(2));
        assert_eq!(config.labels, vec!["a".to_string()]);
    }
}
