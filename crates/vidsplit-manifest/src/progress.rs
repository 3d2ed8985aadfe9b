use crate::dataset::LabelIndex;
use crate::split::Split;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    LabelScanned { label: String, index: LabelIndex, files: usize },
    SplitWritten { split: Split, path: PathBuf, lines: usize },
    Finished { total: usize },
}

pub trait ProgressSink {
    fn on_event(&self, event: ProgressEvent);
}

#[derive(Debug, Default)]
pub struct StdoutProgressSink;

impl ProgressSink for StdoutProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::LabelScanned { label, index, files } => {
                println!("[scan] {label} (index {index}): {files} files");
            }
            ProgressEvent::SplitWritten { split, path, lines } => {
                println!("[{split}] {lines} lines -> {}", path.display());
            }
            ProgressEvent::Finished { total } => println!("[done] {total} entries"),
        }
    }
}

#[derive(Debug, Default)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn on_event(&self, _event: ProgressEvent) {}
}
