//! Vidsplit Manifest
//!
//! Dataset manifest primitives for label-partitioned video trees:
//! - Scanning `<root>/<label>/*` into an index table (`scan_labels`)
//! - The per-label 2:1:1 train/val/test split (`SplitSizes`)
//! - Writing `train.csv`, `val.csv`, `test.csv` (`ManifestGenerator`)
//! - Reading manifests back and summarizing them (`summarize`)

pub mod artifacts;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod layout;
pub mod progress;
pub mod reader;
pub mod scan;
pub mod split;

pub use artifacts::{GenerationReport, GroupSplit, ManifestArtifact};
pub use config::VidsplitConfig;
pub use dataset::{FileEntry, IndexTable, LabelIndex, LabelSet};
pub use error::{ManifestError, ManifestResult};
pub use generator::{generate, ManifestGenerator};
pub use layout::ManifestLayout;
pub use progress::{NoopProgressSink, ProgressEvent, ProgressSink, StdoutProgressSink};
pub use reader::{read_manifest, summarize, ManifestLine, ManifestSummary, SplitSummary};
pub use scan::scan_labels;
pub use split::{Split, SplitSizes};
