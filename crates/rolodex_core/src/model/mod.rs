//! Domain model for groups and their dynamic-field contacts.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep identifier and timestamp generation explicit and constructor-side.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - Deleting a group is the only operation with cross-entity effects
//!   (contact cascade); there is no soft delete.

pub mod contact;
pub mod field;
pub mod group;
