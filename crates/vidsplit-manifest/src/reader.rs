//! Reading manifests back and summarizing them.

use crate::dataset::{FileEntry, LabelIndex};
use crate::error::{ManifestError, ManifestResult};
use crate::layout::ManifestLayout;
use crate::split::Split;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestLine {
    pub entry: FileEntry,
    pub index: LabelIndex,
}

impl ManifestLine {
    /// Parse `<path> <index>`, splitting on the last space.
    pub fn parse(line: &str) -> Result<Self, String> {
        let (path, index) = line.rsplit_once(' ').ok_or_else(|| "expected '<path> <label_index>'".to_string())?;
        if path.is_empty() {
            return Err("empty path".to_string());
        }
        let index = index
            .parse::<u32>()
            .map_err(|e| format!("invalid label index '{index}': {e}"))?;
        Ok(Self { entry: FileEntry(path.to_string()), index: LabelIndex(index) })
    }
}

pub fn read_manifest(path: &Path) -> ManifestResult<Vec<ManifestLine>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ManifestError::ManifestNotFound { path: path.to_path_buf() });
        }
        Err(e) => return Err(e.into()),
    };

    let mut lines = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed = ManifestLine::parse(line).map_err(|reason| ManifestError::MalformedLine {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        })?;
        lines.push(parsed);
    }

    Ok(lines)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSummary {
    pub split: Split,
    pub path: PathBuf,
    pub lines: usize,
    /// Line count per label index.
    pub per_label: BTreeMap<u32, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestSummary {
    pub splits: Vec<SplitSummary>,
    pub total_entries: usize,
    /// `max label index + 1`, or 0 when every manifest is empty.
    pub num_classes: u32,
    /// Paths listed in more than one manifest.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlaps: Vec<String>,
}

impl ManifestSummary {
    #[must_use]
    pub fn split(&self, split: Split) -> Option<&SplitSummary> {
        self.splits.iter().find(|s| s.split == split)
    }
}

pub fn summarize(layout: &ManifestLayout) -> ManifestResult<ManifestSummary> {
    let mut splits = Vec::with_capacity(Split::ALL.len());
    let mut seen: HashMap<String, Split> = HashMap::new();
    let mut overlaps = Vec::new();
    let mut max_index: Option<u32> = None;

    for split in Split::ALL {
        let path = layout.manifest_path(split);
        let lines = read_manifest(&path)?;

        let mut per_label = BTreeMap::new();
        for line in &lines {
            *per_label.entry(line.index.0).or_insert(0) += 1;
            max_index = max_index.max(Some(line.index.0));

            if let Some(first) = seen.get(line.entry.as_str()) {
                if *first != split {
                    overlaps.push(line.entry.0.clone());
                }
            } else {
                seen.insert(line.entry.0.clone(), split);
            }
        }

        tracing::debug!(split = %split, lines = lines.len(), "read manifest");
        splits.push(SplitSummary { split, path, lines: lines.len(), per_label });
    }

    overlaps.sort();
    overlaps.dedup();
    if !overlaps.is_empty() {
        tracing::warn!(count = overlaps.len(), "entries appear in more than one manifest");
    }

    Ok(ManifestSummary {
        total_entries: splits.iter().map(|s| s.lines).sum(),
        num_classes: max_index.map_or(0, |m| m + 1),
        splits,
        overlaps,
    })
}
