// src/cli.rs
use std::{env, path::PathBuf};

use crate::config::options::RunOptions;
use crate::error::{Error, Result};
use crate::specs::SchemaVersion;

pub const HELP: &str = include_str!("cli_help.txt");

pub enum Mode {
    Run(RunOptions),
    Help,
}

/// Parse the process arguments.
pub fn detect_mode() -> Result<Mode> {
    parse_cli(env::args().skip(1))
}

/// Parse an argument list (program name already stripped).
pub fn parse_cli<I, S>(args: I) -> Result<Mode>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut opts = RunOptions::default();
    let mut args = args.into_iter().map(Into::<String>::into);

    while let Some(a) = args.next() {
        match a.as_str() {
            "-i" | "--input" => opts.input_dir = PathBuf::from(value(&mut args, &a)?),
            "-o" | "--out" => opts.out = Some(PathBuf::from(value(&mut args, &a)?)),
            "--schema" => {
                let v = value(&mut args, &a)?;
                opts.schema = v.parse::<SchemaVersion>().map_err(Error::Usage)?;
            }
            "--key" => {
                let v = value(&mut args, &a)?;
                if v.is_empty() { return Err(usage("Envelope key cannot be empty")); }
                opts.envelope_key = v;
            }
            "--list-fields" => opts.list_fields = true,
            "-v" | "--verbose" => opts.verbose = true,
            "-h" | "--help" => return Ok(Mode::Help),
            _ => return Err(usage(format!("Unknown arg: {}", a))),
        }
    }

    Ok(Mode::Run(opts))
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().ok_or_else(|| usage(format!("Missing value for {}", flag)))
}

fn usage(msg: impl Into<String>) -> Error {
    Error::Usage(msg.into())
}
