//! Tabular import/export pipelines.
//!
//! # Responsibility
//! - Turn uploaded CSV/spreadsheet payloads into contacts plus a column
//!   schema (`import`).
//! - Shape a group's contacts back into rows-plus-columns form (`export`).
//!
//! # Invariants
//! - Import and export are text-oriented: cell values live as strings and
//!   are never re-typed on the way out.
//! - Neither direction wraps its row work in a transaction; partial import
//!   effects stay persisted on failure.

pub mod export;
pub mod import;
