// src/export.rs
//! Tabular emitter.
//!
//! Three header rows (weight, signal, name) then one row per document, all in
//! catalog order after the emission policy has picked its columns. Selection
//! happens once, so every row has the same width by construction.

use std::io::{self, Write};

use crate::config::consts::CELL_SEP;
use crate::csv::{rows_to_string, write_row};
use crate::decode::render;
use crate::specs::{Catalog, Column, EmissionPolicy, Field, Row};

pub struct Emitter<'c> {
    catalog: &'c Catalog,
    selected: Vec<usize>,
}

impl<'c> Emitter<'c> {
    /// Pair a catalog with its own emission policy.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_policy(catalog, catalog.emission())
    }

    pub fn with_policy(catalog: &'c Catalog, policy: EmissionPolicy) -> Self {
        let selected = catalog
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, f)| match policy {
                EmissionPolicy::EmitAll => true,
                EmissionPolicy::ScoredOnly => !f.weight().is_excluded(),
            })
            .map(|(i, _)| i)
            .collect();
        Self { catalog, selected }
    }

    /// Number of emitted columns.
    pub fn width(&self) -> usize {
        self.selected.len()
    }

    fn emitted(&self) -> impl Iterator<Item = &Field> {
        self.selected.iter().map(|&i| &self.catalog.fields()[i])
    }

    pub fn header_rows(&self) -> [Vec<String>; 3] {
        [
            self.emitted().map(|f| f.weight().to_string()).collect(),
            self.emitted().map(|f| f.signal().to_string()).collect(),
            self.emitted().map(|f| s!(f.name())).collect(),
        ]
    }

    /// Render the selected cells of a full catalog row.
    pub fn data_cells(&self, row: &Row) -> Vec<String> {
        self.selected
            .iter()
            .map(|&i| row.get(i).map(render).unwrap_or_default())
            .collect()
    }

    pub fn write_headers<W: Write>(&self, mut w: W) -> io::Result<()> {
        for header in self.header_rows() {
            write_row(&mut w, &header, CELL_SEP)?;
        }
        Ok(())
    }

    pub fn write_row<W: Write>(&self, w: W, row: &Row) -> io::Result<()> {
        write_row(w, &self.data_cells(row), CELL_SEP)
    }

    /// Headers plus rows as one string.
    pub fn to_tsv_string(&self, rows: &[Row]) -> String {
        let mut lines: Vec<Vec<String>> = self.header_rows().into();
        lines.extend(rows.iter().map(|r| self.data_cells(r)));
        rows_to_string(&lines, CELL_SEP)
    }
}
