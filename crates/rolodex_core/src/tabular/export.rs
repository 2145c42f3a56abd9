//! Export formatter.
//!
//! # Responsibility
//! - Shape one group's contacts back into rows-plus-columns tabular form.
//!
//! # Invariants
//! - Rows carry each contact's field map verbatim; columns carry the stored
//!   schema verbatim. The two are not reconciled.
//! - A group with zero contacts exports as empty rows AND empty columns,
//!   even when a schema is stored.

use crate::model::field::FieldMap;
use crate::model::group::GroupId;
use crate::repo::contact_repo::ContactRepository;
use crate::repo::group_repo::{GroupRepository, RepoError};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ExportResult<T> = Result<T, ExportError>;

/// Export-formatter error.
#[derive(Debug)]
pub enum ExportError {
    /// Target group does not exist.
    GroupNotFound(GroupId),
    /// Persistence failure while reading the group or its contacts.
    Repo(RepoError),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GroupNotFound(id) => write!(f, "group not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::GroupNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ExportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Tabular read model of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupExport {
    /// One field map per contact, in storage order.
    pub rows: Vec<FieldMap>,
    /// The group's stored column schema.
    pub columns: Vec<String>,
}

/// Exports a group's contacts as rows plus the stored column schema.
///
/// # Contract
/// - The group must exist.
/// - Zero contacts export as `rows: [], columns: []` regardless of the
///   stored schema.
/// - Row field maps may carry keys the schema does not list, and vice
///   versa; callers address cells by column name.
pub fn export_group<G: GroupRepository, C: ContactRepository>(
    groups: &G,
    contacts: &C,
    group_id: GroupId,
) -> ExportResult<GroupExport> {
    let group = groups
        .get_group(group_id)?
        .ok_or(ExportError::GroupNotFound(group_id))?;

    let members = contacts.list_contacts_by_group(group_id)?;
    if members.is_empty() {
        return Ok(GroupExport {
            rows: Vec::new(),
            columns: Vec::new(),
        });
    }

    Ok(GroupExport {
        rows: members.into_iter().map(|contact| contact.data).collect(),
        columns: group.column_schema,
    })
}
