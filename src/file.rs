// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Output sink: the given file (parent dirs created, truncated), or stdout.
pub fn open_sink(out: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = out else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path).map_err(|source| output_error(path, source))?;
    Ok(Box::new(BufWriter::new(file)))
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        let source = io::Error::new(io::ErrorKind::AlreadyExists, "path exists but is not a directory");
        return Err(output_error(dir, source));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| output_error(dir, source))?;
    }
    Ok(())
}

/// Snapshot files directly under `dir`, sorted by file name.
/// Subdirectories are ignored; an unreadable directory is fatal.
pub fn list_snapshots(dir: &Path) -> Result<Vec<PathBuf>> {
    let input_error = |source| Error::InputDir { path: dir.to_path_buf(), source };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(input_error)? {
        let entry = entry.map_err(input_error)?;
        if entry.file_type().map_err(input_error)?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn output_error(path: &Path, source: io::Error) -> Error {
    Error::Output { path: path.to_path_buf(), source }
}
