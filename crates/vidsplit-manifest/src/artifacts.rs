use crate::dataset::LabelIndex;
use crate::error::{ManifestError, ManifestResult};
use crate::split::{Split, SplitSizes};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// A manifest file written by a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestArtifact {
    pub split: Split,
    pub path: PathBuf,
    pub lines: usize,
    pub sha256: String,
}

/// Split sizes contributed by one label index group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSplit {
    pub index: LabelIndex,
    pub sizes: SplitSizes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub created_at: DateTime<Utc>,
    /// Seed used for shuffling, if the run was seeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub groups: Vec<GroupSplit>,
    pub totals: SplitSizes,
    pub artifacts: Vec<ManifestArtifact>,
}

impl GenerationReport {
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.totals.total()
    }

    #[must_use]
    pub fn artifact(&self, split: Split) -> Option<&ManifestArtifact> {
        self.artifacts.iter().find(|a| a.split == split)
    }
}

pub fn sha256_file(path: &Path) -> ManifestResult<String> {
    let bytes = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

pub fn make_artifact(split: Split, path: PathBuf, lines: usize) -> ManifestResult<ManifestArtifact> {
    if !path.exists() {
        return Err(ManifestError::ManifestNotFound { path });
    }

    let hash = sha256_file(&path)?;
    Ok(ManifestArtifact { split, path, lines, sha256: hash })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sha256_of_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.csv");
        std::fs::write(&path, b"").unwrap();

        assert_eq!(
            sha256_file(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_make_artifact_requires_existing_file() {
        let temp = TempDir::new().unwrap();
        let err = make_artifact(Split::Val, temp.path().join("val.csv"), 0).unwrap_err();
        assert!(matches!(err, ManifestError::ManifestNotFound { .. }));
    }
}
