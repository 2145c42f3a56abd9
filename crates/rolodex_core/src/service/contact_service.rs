//! Contact use-case service.
//!
//! # Responsibility
//! - Provide stable contact CRUD entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Creation never checks group existence; dangling `group_id` is legal.
//! - Edits replace the whole field map, never merge.

use crate::model::contact::{Contact, ContactId};
use crate::model::field::FieldMap;
use crate::model::group::GroupId;
use crate::repo::contact_repo::ContactRepository;
use crate::repo::group_repo::RepoResult;

/// Use-case service wrapper for contact operations.
pub struct ContactService<C: ContactRepository> {
    contacts: C,
}

impl<C: ContactRepository> ContactService<C> {
    /// Creates a service using the provided repository implementation.
    pub fn new(contacts: C) -> Self {
        Self { contacts }
    }

    /// Creates a new contact in a group and returns the persisted entity.
    ///
    /// # Contract
    /// - Generates the id and creation timestamp.
    /// - Accepts any flat scalar field map, including an empty one.
    pub fn create_contact(&self, group_id: GroupId, data: FieldMap) -> RepoResult<Contact> {
        let contact = Contact::new(group_id, data);
        self.contacts.create_contact(&contact)?;
        Ok(contact)
    }

    /// Gets one contact by id.
    pub fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.contacts.get_contact(id)
    }

    /// Lists a group's contacts in storage order.
    pub fn list_by_group(&self, group_id: GroupId) -> RepoResult<Vec<Contact>> {
        self.contacts.list_contacts_by_group(group_id)
    }

    /// Replaces the whole dynamic-field map of one contact.
    ///
    /// Returns repository-level not-found errors unchanged.
    pub fn update_data(&self, id: ContactId, data: &FieldMap) -> RepoResult<()> {
        self.contacts.update_contact_data(id, data)
    }

    /// Deletes one contact by id.
    pub fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        self.contacts.delete_contact(id)
    }
}
