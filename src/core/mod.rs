// src/core/mod.rs

pub mod dom;
pub mod intake;
pub mod sanitize;

pub use dom::Document;
