use crate::artifacts::{make_artifact, GenerationReport, GroupSplit};
use crate::dataset::{FileEntry, IndexTable, LabelIndex, LabelSet};
use crate::error::{ManifestError, ManifestResult};
use crate::layout::ManifestLayout;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::scan::scan_labels;
use crate::split::{split_slices, Split, SplitSizes};
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Scan a label-partitioned tree and write train/val/test manifests.
#[derive(Debug, Clone)]
pub struct ManifestGenerator {
    root: PathBuf,
    labels: LabelSet,
    layout: ManifestLayout,
    seed: Option<u64>,
}

impl ManifestGenerator {
    #[must_use]
    pub fn new(root: PathBuf, labels: LabelSet) -> Self {
        Self { root, labels, layout: ManifestLayout::current_dir(), seed: None }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ManifestLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn layout(&self) -> &ManifestLayout {
        &self.layout
    }

    /// Scan every label, then shuffle and write.
    ///
    /// Unseeded runs draw the shuffle seed from OS entropy.
    pub fn run(&self, progress: &dyn ProgressSink) -> ManifestResult<GenerationReport> {
        let mut table = scan_labels(&self.root, &self.labels, progress)?;
        let mut rng = self.seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);

        let mut report = generate(&mut table, &self.layout, &mut rng, progress)?;
        report.seed = self.seed;
        Ok(report)
    }
}

/// Shuffle each group in place and write the manifests described by `layout`.
///
/// Lines are staged in temporary files next to the targets and renamed into
/// place only once all three have been written and synced. On error the
/// previous manifests are left as they were.
pub fn generate<R: Rng + ?Sized>(
    table: &mut IndexTable,
    layout: &ManifestLayout,
    rng: &mut R,
    progress: &dyn ProgressSink,
) -> ManifestResult<GenerationReport> {
    std::fs::create_dir_all(layout.dir()).map_err(|e| ManifestError::write_failure(layout.dir(), e))?;

    let mut pending = Split::ALL
        .iter()
        .map(|&split| StagedManifest::create(layout, split))
        .collect::<ManifestResult<Vec<_>>>()?;

    let mut groups = Vec::with_capacity(table.len());
    let mut totals = SplitSizes::default();

    for (index, files) in table.iter_mut() {
        files.shuffle(rng);
        let (train, val, test) = split_slices(files.as_slice());

        pending[0].write_all(train, index)?;
        pending[1].write_all(val, index)?;
        pending[2].write_all(test, index)?;

        let sizes = SplitSizes::for_len(files.len());
        tracing::debug!(index = index.0, train = sizes.train, val = sizes.val, test = sizes.test, "split label");
        totals.add(&sizes);
        groups.push(GroupSplit { index, sizes });
    }

    let staged = pending
        .into_iter()
        .map(StagedManifest::finish)
        .collect::<ManifestResult<Vec<_>>>()?;

    let mut artifacts = Vec::with_capacity(staged.len());
    for (split, file, lines) in staged {
        let path = layout.manifest_path(split);
        file.persist(&path).map_err(|e| ManifestError::write_failure(&path, e.error))?;

        tracing::info!(split = %split, lines, path = %path.display(), "wrote manifest");
        progress.on_event(ProgressEvent::SplitWritten { split, path: path.clone(), lines });
        artifacts.push(make_artifact(split, path, lines)?);
    }

    progress.on_event(ProgressEvent::Finished { total: totals.total() });

    Ok(GenerationReport { created_at: Utc::now(), seed: None, groups, totals, artifacts })
}

/// One manifest being written to a temporary file.
struct StagedManifest {
    split: Split,
    target: PathBuf,
    writer: BufWriter<NamedTempFile>,
    lines: usize,
}

impl StagedManifest {
    fn create(layout: &ManifestLayout, split: Split) -> ManifestResult<Self> {
        let target = layout.manifest_path(split);
        let prefix = format!(".{}.", split.as_str());
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(".tmp");
        #[cfg(unix)]
        builder.permissions(manifest_permissions(&target));
        let file = builder
            .tempfile_in(layout.dir())
            .map_err(|e| ManifestError::write_failure(&target, e))?;
        Ok(Self { split, target, writer: BufWriter::new(file), lines: 0 })
    }

    fn write_all(&mut self, entries: &[FileEntry], index: LabelIndex) -> ManifestResult<()> {
        for entry in entries {
            writeln!(self.writer, "{entry} {index}").map_err(|e| ManifestError::write_failure(&self.target, e))?;
            self.lines += 1;
        }
        Ok(())
    }

    fn finish(self) -> ManifestResult<(Split, NamedTempFile, usize)> {
        let target = self.target;
        let file = self
            .writer
            .into_inner()
            .map_err(|e| ManifestError::write_failure(&target, e.into_error()))?;
        file.as_file().sync_all().map_err(|e| ManifestError::write_failure(&target, e))?;
        Ok((self.split, file, self.lines))
    }
}

/// Mode for a staged manifest: the existing target's mode, or 0644 filtered by the umask.
#[cfg(unix)]
fn manifest_permissions(target: &Path) -> std::fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(target) {
        Ok(meta) if meta.is_file() => meta.permissions(),
        _ => std::fs::Permissions::from_mode(0o644),
    }
}
