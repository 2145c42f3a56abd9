//! Contact search entry points.
//!
//! # Responsibility
//! - Expose free-text lookup over a group's contacts.
//! - Keep match semantics (case folding, value stringification) inside core.

pub mod scan;
