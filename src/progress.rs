// src/progress.rs
use std::path::Path;

use crate::error::IntakeError;

/// Lightweight progress reporting for a batch run.
/// Frontends implement this to surface status; every hook defaults to a no-op.
pub trait Progress {
    /// Called at the start with the number of snapshots found.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One snapshot produced a data row.
    fn item_done(&mut self, _path: &Path) {}

    /// One snapshot was skipped.
    fn item_failed(&mut self, _path: &Path, _err: &IntakeError) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Routes progress through the log macros. Used by the CLI.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        logf!("Extracting {total} snapshot(s)");
    }

    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }

    fn item_done(&mut self, path: &Path) {
        self.done += 1;
        logd!("[{}/{}] {}", self.done + self.failed, self.total, path.display());
    }

    fn item_failed(&mut self, path: &Path, err: &IntakeError) {
        self.failed += 1;
        loge!("Skipping {}: {err}", path.display());
    }

    fn finish(&mut self) {
        logf!("Done: {} row(s), {} skipped", self.done, self.failed);
    }
}
