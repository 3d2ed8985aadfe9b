use crate::dataset::{FileEntry, IndexTable, LabelSet};
use crate::error::{ManifestError, ManifestResult};
use crate::progress::{ProgressEvent, ProgressSink};
use std::path::Path;
use walkdir::WalkDir;

/// Build the index table from `<root>/<label>/*`.
///
/// Every label directory is listed before anything is returned, so a missing
/// directory aborts the run before any manifest is touched. Entries are sorted
/// by file name so that seeded runs are reproducible.
pub fn scan_labels(root: &Path, labels: &LabelSet, progress: &dyn ProgressSink) -> ManifestResult<IndexTable> {
    let resolved = labels.resolved()?;
    let mut table = IndexTable::new();

    for (label, index) in resolved {
        let dir = root.join(label);
        if !dir.is_dir() {
            return Err(ManifestError::DirectoryNotFound { label: label.to_string(), path: dir });
        }

        let names = list_files(&dir)?;
        let group = table.group_mut(index);
        for name in &names {
            let entry = FileEntry::new(label, name);
            if entry.as_str().chars().any(char::is_whitespace) {
                return Err(ManifestError::UnsafePath { path: entry.0, reason: "file name contains whitespace" });
            }
            group.push(entry);
        }

        tracing::debug!(label, index = index.0, files = names.len(), "scanned label directory");
        progress.on_event(ProgressEvent::LabelScanned {
            label: label.to_string(),
            index,
            files: names.len(),
        });
    }

    Ok(table)
}

/// Names of the regular files directly under `dir`, sorted.
///
/// Symlinks count as files when they resolve to one. Dangling links and
/// subdirectories are skipped.
fn list_files(dir: &Path) -> ManifestResult<Vec<String>> {
    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name();

    let mut names = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| ManifestError::ListFailure {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e,
        })?;

        let is_file = if entry.path_is_symlink() {
            match std::fs::metadata(entry.path()) {
                Ok(meta) => meta.is_file(),
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "skipping dangling symlink");
                    continue;
                }
            }
        } else {
            entry.file_type().is_file()
        };
        if !is_file {
            tracing::debug!(path = %entry.path().display(), "skipping non-file entry");
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            return Err(ManifestError::UnsafePath {
                path: entry.path().to_string_lossy().into_owned(),
                reason: "file name is not valid UTF-8",
            });
        };
        names.push(name.to_string());
    }

    Ok(names)
}
