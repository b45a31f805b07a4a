// src/error.rs
use std::{io, path::PathBuf};

use thiserror::Error;

/// Why a single snapshot could not be turned into a document.
/// Recoverable: the runner logs it and moves on to the next snapshot.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("cannot read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("snapshot envelope is not valid JSON: {0}")]
    Envelope(#[from] serde_json::Error),
    #[error("snapshot envelope has no string payload (looked for '{0}')")]
    MissingPayload(String),
    #[error("payload is not a call expression with a string-literal first argument")]
    NoLiteral,
    #[error("string literal starting at byte {0} is never closed")]
    UnterminatedLiteral(usize),
    #[error("bad escape sequence at byte {0} of the string literal")]
    BadEscape(usize),
}

/// Catalog construction failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate field name '{0}' in catalog")]
    DuplicateField(String),
}

/// Fatal, run-level failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read input directory {path}: {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot open output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Usage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
