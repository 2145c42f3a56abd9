//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for groups and contacts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repositories are constructed via `try_new` against a migrated connection.
//! - Repository APIs return semantic errors (`GroupNotFound`,
//!   `ContactNotFound`) in addition to DB transport errors.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod contact_repo;
pub mod group_repo;
