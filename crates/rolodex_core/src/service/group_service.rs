//! Group use-case service.
//!
//! # Responsibility
//! - Provide stable group CRUD entry points for core callers.
//! - Own the cascade delete that keeps contacts consistent with groups.
//!
//! # Invariants
//! - `delete_group` always runs the contact cascade, even when the group row
//!   was already absent; the outcome reports both effects.
//! - The cascade removes the group row before its contacts, so a mid-flight
//!   observer sees dangling contacts rather than a half-deleted group.

use crate::model::group::{Group, GroupId};
use crate::repo::contact_repo::ContactRepository;
use crate::repo::group_repo::{GroupRepository, RepoResult};
use log::info;

/// Result of one cascade delete run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeDeleteOutcome {
    /// Whether a group row existed and was removed.
    pub group_deleted: bool,
    /// Number of contact rows removed by the cascade.
    pub contacts_deleted: usize,
}

/// Use-case service wrapper for group operations.
pub struct GroupService<G: GroupRepository, C: ContactRepository> {
    groups: G,
    contacts: C,
}

impl<G: GroupRepository, C: ContactRepository> GroupService<G, C> {
    /// Creates a service using the provided repository implementations.
    pub fn new(groups: G, contacts: C) -> Self {
        Self { groups, contacts }
    }

    /// Creates a new group and returns the persisted entity.
    ///
    /// # Contract
    /// - Generates the id and creation timestamp.
    /// - Starts with an empty column schema.
    pub fn create_group(
        &self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> RepoResult<Group> {
        let group = Group::new(name, description);
        self.groups.create_group(&group)?;
        Ok(group)
    }

    /// Gets one group by id.
    pub fn get_group(&self, id: GroupId) -> RepoResult<Option<Group>> {
        self.groups.get_group(id)
    }

    /// Lists groups in storage order.
    pub fn list_groups(&self) -> RepoResult<Vec<Group>> {
        self.groups.list_groups()
    }

    /// Replaces the whole column schema of one group.
    ///
    /// Returns repository-level not-found errors unchanged.
    pub fn update_schema(&self, id: GroupId, columns: &[String]) -> RepoResult<()> {
        self.groups.update_group_schema(id, columns)
    }

    /// Deletes a group together with all of its contacts.
    ///
    /// # Contract
    /// - Never errors on a missing group; `group_deleted` reports presence.
    /// - The contact cascade runs unconditionally.
    pub fn delete_group(&self, id: GroupId) -> RepoResult<CascadeDeleteOutcome> {
        let group_deleted = self.groups.delete_group(id)?;
        let contacts_deleted = self.contacts.delete_contacts_by_group(id)?;

        info!(
            "event=group_cascade_delete module=service status=ok group_id={id} \
             group_deleted={group_deleted} contacts_deleted={contacts_deleted}"
        );

        Ok(CascadeDeleteOutcome {
            group_deleted,
            contacts_deleted,
        })
    }
}
