use std::path::PathBuf;
use thiserror::Error;

pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid label configuration: {0}")]
    InvalidConfig(String),

    #[error("directory for label '{label}' not found: {}", .path.display())]
    DirectoryNotFound { label: String, path: PathBuf },

    #[error("file entry cannot be written to a space-delimited manifest ({reason}): {path}")]
    UnsafePath { path: String, reason: &'static str },

    #[error("failed to list {}: {source}", .path.display())]
    ListFailure {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to write manifest {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest not found: {}", .path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("{}:{line}: {reason}", .path.display())]
    MalformedLine { path: PathBuf, line: usize, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

}

impl ManifestError {
    pub(crate) fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure { path: path.into(), source }
    }
}
