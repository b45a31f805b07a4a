// src/specs/mod.rs
//! # Extraction specs
//!
//! This module encodes **where each value lives in a school-profile snapshot**
//! and how it becomes a column. It knows the page; it does not know files,
//! envelopes or output formats.
//!
//! ## What lives here
//! - [`field`]: the `Field` unit (name, signal, weight, extraction strategy).
//! - [`schema`]: one settings bundle per site revision (`SchemaVersion`).
//! - [`survey`]: the parent questionnaire and its historical phrasings.
//! - [`catalog`]: builds the ordered, name-unique field list for a schema.
//!
//! ## What does **not** live here
//! - Snapshot loading and payload unescaping (`core::intake`).
//! - Header rows, emission filtering and TSV writing (`export`, `csv`).
//!
//! ## Typical call chain
//! ```text
//! runner → Catalog::build(&schema) → catalog.extract(&doc) → export::Emitter
//! ```
//!
//! ## Conventions & invariants
//! - Field names are unique within a catalog and stable across runs.
//! - A missing label, chart or sentence is an absent cell, never an error.
//! - Catalog order is output order.

pub mod catalog;
pub mod field;
pub mod schema;
pub mod survey;

pub use catalog::{Catalog, Row};
pub use field::{Column, Extract, Field, Occurrence, Signal, SurveyAnchor, SurveyPolicy, Weight};
pub use schema::{EmissionPolicy, Schema, SchemaVersion, SurveyPlan};
