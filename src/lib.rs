//! Core library for the sheet-probe command line application.
//!
//! The library opens a spreadsheet workbook, picks sheets by exact name or
//! substring, and reports each picked sheet's column types, non-null counts
//! and first rows. Reading lives under [`io`], the tabular representation in
//! [`model`], sheet matching in [`select`], the per-sheet digest in
//! [`summary`], output formatting in [`report`], and the orchestration in
//! [`inspect`].

pub mod error;
pub mod inspect;
pub mod io;
pub mod logging;
pub mod model;
pub mod report;
pub mod select;
pub mod summary;

pub use error::{Result, ToolError};
