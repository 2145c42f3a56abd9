//! Core domain logic for Rolodex contact management.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod tabular;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactId};
pub use model::field::{FieldMap, FieldValue};
pub use model::group::{Group, GroupId};
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository, CONTACTS_LIST_CAP};
pub use repo::group_repo::{
    GroupRepository, RepoError, RepoResult, SqliteGroupRepository, GROUPS_LIST_CAP,
};
pub use search::scan::search_contacts;
pub use service::contact_service::ContactService;
pub use service::group_service::{CascadeDeleteOutcome, GroupService};
pub use tabular::export::{export_group, ExportError, ExportResult, GroupExport};
pub use tabular::import::{import_table, ImportError, ImportOutcome, ImportResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
