use crate::error::{ManifestError, ManifestResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Integer class id written next to every file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelIndex(pub u32);

impl std::fmt::Display for LabelIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Relative path of one data file, `<label>/<file name>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileEntry(pub String);

impl FileEntry {
    #[must_use]
    pub fn new(label: &str, file_name: &str) -> Self {
        Self(format!("{label}/{file_name}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered label names plus the caller-supplied label -> index mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    pub labels: Vec<String>,
    pub indexes: BTreeMap<String, u32>,
}

impl LabelSet {
    #[must_use]
    pub fn new(labels: Vec<String>, indexes: BTreeMap<String, u32>) -> Self {
        Self { labels, indexes }
    }

    /// Append a label with its index, replacing any earlier index for the same name.
    pub fn push(&mut self, label: impl Into<String>, index: u32) {
        let label = label.into();
        if !self.labels.contains(&label) {
            self.labels.push(label.clone());
        }
        self.indexes.insert(label, index);
    }

    pub fn index_of(&self, label: &str) -> ManifestResult<LabelIndex> {
        self.indexes
            .get(label)
            .copied()
            .map(LabelIndex)
            .ok_or_else(|| ManifestError::InvalidConfig(format!("label '{label}' has no index")))
    }

    /// Labels paired with their indexes, in list order.
    pub fn resolved(&self) -> ManifestResult<Vec<(&str, LabelIndex)>> {
        self.validate()?;
        self.labels
            .iter()
            .map(|label| -> ManifestResult<_> { Ok((label.as_str(), self.index_of(label)?)) })
            .collect()
    }

    pub fn validate(&self) -> ManifestResult<()> {
        if self.labels.is_empty() {
            return Err(ManifestError::InvalidConfig("no labels configured".to_string()));
        }
        for (idx, label) in self.labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(ManifestError::InvalidConfig(format!("labels[{idx}] is empty")));
            }
            if label == "."
                || label == ".."
                || label.contains('/')
                || label.contains('\\')
                || label.chars().any(char::is_whitespace)
            {
                return Err(ManifestError::InvalidConfig(format!(
                    "label '{label}' must be a single directory name without whitespace"
                )));
            }
            if self.labels[..idx].contains(label) {
                return Err(ManifestError::InvalidConfig(format!("label '{label}' is listed twice")));
            }
            self.index_of(label)?;
        }
        Ok(())
    }
}

/// Files grouped by label index, in the order each index was first seen.
///
/// Labels sharing an index are merged into one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexTable {
    groups: Vec<(LabelIndex, Vec<FileEntry>)>,
}

impl IndexTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a group exists for `index` even if no files are added to it.
    pub fn group_mut(&mut self, index: LabelIndex) -> &mut Vec<FileEntry> {
        let pos = match self.groups.iter().position(|(i, _)| *i == index) {
            Some(pos) => pos,
            None => {
                self.groups.push((index, Vec::new()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[pos].1
    }

    pub fn push(&mut self, index: LabelIndex, entry: FileEntry) {
        self.group_mut(index).push(entry);
    }

    #[must_use]
    pub fn get(&self, index: LabelIndex) -> Option<&[FileEntry]> {
        self.groups.iter().find(|(i, _)| *i == index).map(|(_, files)| files.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabelIndex, &[FileEntry])> {
        self.groups.iter().map(|(i, files)| (*i, files.as_slice()))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (LabelIndex, &mut Vec<FileEntry>)> {
        self.groups.iter_mut().map(|(i, files)| (*i, files))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.groups.iter().map(|(_, files)| files.len()).sum()
    }
}
