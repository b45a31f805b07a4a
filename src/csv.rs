// src/csv.rs
use std::io::{self, Write};

use crate::core::sanitize::normalize_ws;

/* ---------------- Writing ---------------- */

/// Write a single separated row to any writer.
/// Cells are whitespace-normalized so a stray tab or newline inside a value
/// cannot shift the columns. No trailing separator.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        write!(w, "{}", normalize_ws(cell))?;
    }
    writeln!(w)
}

/* ---------------- Convenience: stringify rows as-is ---------------- */

pub fn rows_to_string(rows: &[Vec<String>], sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
