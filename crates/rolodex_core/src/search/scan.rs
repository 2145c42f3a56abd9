//! Substring-scan search implementation.
//!
//! # Responsibility
//! - Match a free-text query against every field of a group's contacts.
//!
//! # Invariants
//! - Matching is case-insensitive substring over each value's canonical
//!   text form; a contact appears at most once.
//! - The empty query matches every contact of the group, including those
//!   with an empty field map.
//! - Each call is a full scan bounded by the contact list cap; results come
//!   back in storage order.

use crate::model::contact::Contact;
use crate::model::group::GroupId;
use crate::repo::contact_repo::ContactRepository;
use crate::repo::group_repo::RepoResult;

/// Finds a group's contacts whose field values contain `query`.
pub fn search_contacts<C: ContactRepository>(
    contacts: &C,
    group_id: GroupId,
    query: &str,
) -> RepoResult<Vec<Contact>> {
    let members = contacts.list_contacts_by_group(group_id)?;
    if query.is_empty() {
        return Ok(members);
    }

    let needle = query.to_lowercase();
    Ok(members
        .into_iter()
        .filter(|contact| contact_matches(contact, &needle))
        .collect())
}

fn contact_matches(contact: &Contact, needle: &str) -> bool {
    contact
        .data
        .values()
        .any(|value| value.to_text().to_lowercase().contains(needle))
}
