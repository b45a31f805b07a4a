// src/runner.rs
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{
    config::options::RunOptions,
    core::intake::load_snapshot,
    error::{IntakeError, Result},
    export::Emitter,
    file::{list_snapshots, open_sink},
    progress::{NullProgress, Progress},
    specs::{Catalog, Column},
};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Data rows written (one per usable snapshot).
    pub rows: usize,
    /// Snapshots that failed intake, in processing order.
    pub skipped: Vec<PathBuf>,
    /// Emitted columns per row.
    pub columns: usize,
}

/// Top-level runner: resolve the sink, then extract.
/// `progress` can be None (no updates) or Some(&mut impl Progress).
pub fn run(opts: &RunOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    let mut out = open_sink(opts.out.as_deref())?;
    if opts.list_fields {
        list_fields(opts, &mut out)?;
        out.flush()?;
        return Ok(RunSummary::default());
    }
    let summary = run_to(opts, &mut out, progress)?;
    out.flush()?;
    Ok(summary)
}

/// Extract every snapshot in `opts.input_dir` into `out`.
/// One bad snapshot is logged and skipped; only an unreadable input directory
/// or a failing sink stops the run.
pub fn run_to<W: Write>(
    opts: &RunOptions,
    mut out: W,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let mut null = NullProgress;
    let progress: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };

    let catalog = Catalog::for_version(opts.schema)?;
    let emitter = Emitter::new(&catalog);
    let snapshots = list_snapshots(&opts.input_dir)?;

    logd!(
        "Schema {}: {} field(s), {} emitted",
        opts.schema,
        catalog.len(),
        emitter.width()
    );
    if snapshots.is_empty() {
        progress.log(&format!("No snapshots in {}", opts.input_dir.display()));
    }
    progress.begin(snapshots.len());

    emitter.write_headers(&mut out)?;

    let mut summary = RunSummary { columns: emitter.width(), ..RunSummary::default() };
    for path in &snapshots {
        match extract_one(&catalog, &emitter, path, &opts.envelope_key, &mut out) {
            Ok(Ok(())) => {
                summary.rows += 1;
                progress.item_done(path);
            }
            Ok(Err(e)) => {
                progress.item_failed(path, &e);
                summary.skipped.push(path.clone());
            }
            Err(e) => {
                progress.finish();
                return Err(e);
            }
        }
    }

    progress.finish();
    Ok(summary)
}

/// Outer result: sink failure (fatal). Inner: intake failure (skip).
fn extract_one<W: Write>(
    catalog: &Catalog,
    emitter: &Emitter<'_>,
    path: &Path,
    key: &str,
    out: &mut W,
) -> Result<Result<(), IntakeError>> {
    let doc = match load_snapshot(path, key) {
        Ok(doc) => doc,
        Err(e) => return Ok(Err(e)),
    };
    let row = catalog.extract(&doc);
    emitter.write_row(out, &row)?;
    Ok(Ok(()))
}

/// One line per catalog field: name, signal, weight, and whether the schema emits it.
pub fn list_fields<W: Write>(opts: &RunOptions, mut out: W) -> Result<()> {
    let catalog = Catalog::for_version(opts.schema)?;
    let emitter = Emitter::new(&catalog);
    let [_, _, emitted] = emitter.header_rows();

    for f in catalog.fields() {
        let state = if emitted.iter().any(|n| n == f.name()) { "emitted" } else { "dropped" };
        crate::csv::write_row(
            &mut out,
            &[s!(f.name()), f.signal().to_string(), f.weight().to_string(), s!(state)],
            crate::config::consts::CELL_SEP,
        )?;
    }
    Ok(())
}
