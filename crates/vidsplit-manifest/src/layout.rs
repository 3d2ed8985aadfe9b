use crate::split::Split;
use std::path::{Path, PathBuf};

/// Where the three manifests live.
///
/// Default layout is `<dir>/train.csv`, `<dir>/val.csv`, `<dir>/test.csv`.
/// The extension is kept for downstream loaders; content is space-delimited.
#[derive(Debug, Clone)]
pub struct ManifestLayout {
    dir: PathBuf,
}

impl ManifestLayout {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Layout rooted in the current working directory.
    #[must_use]
    pub fn current_dir() -> Self {
        Self::new(PathBuf::from("."))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn file_name(split: Split) -> &'static str {
        match split {
            Split::Train => "train.csv",
            Split::Val => "val.csv",
            Split::Test => "test.csv",
        }
    }

    #[must_use]
    pub fn manifest_path(&self, split: Split) -> PathBuf {
        self.dir.join(Self::file_name(split))
    }
}
