// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod decode;
pub mod error;
pub mod specs;

pub mod csv;
pub mod export;
pub mod file;
pub mod progress;
pub mod runner;

pub use error::{Error, Result};
