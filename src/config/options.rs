// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::specs::SchemaVersion;

/// Everything one batch run needs to know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Directory of cached snapshot files.
    pub input_dir: PathBuf,
    /// Output file; `None` writes to stdout.
    pub out: Option<PathBuf>,
    /// Schema version, which also fixes the emission policy.
    pub schema: SchemaVersion,
    /// Envelope field holding the call expression.
    pub envelope_key: String,
    pub verbose: bool,
    /// Print the column catalog instead of extracting.
    pub list_fields: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            out: None,
            schema: SchemaVersion::default(),
            envelope_key: s!(ENVELOPE_KEY),
            verbose: false,
            list_fields: false,
        }
    }
}

impl RunOptions {
    pub fn new(input_dir: impl AsRef<Path>, schema: SchemaVersion) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            schema,
            ..Self::default()
        }
    }
}
