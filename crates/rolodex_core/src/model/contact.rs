//! Contact domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another contact.
//! - `group_id` references exactly one group; the reference may dangle
//!   after a group is deleted out from under it (no write-time check).
//! - `data` is schema-less: any field names, scalar values only.

use crate::model::field::FieldMap;
use crate::model::group::GroupId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a contact.
pub type ContactId = Uuid;

/// A dynamic-field record belonging to one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable global ID, assigned at creation.
    pub id: ContactId,
    /// Owning group; not validated against live groups at write time.
    pub group_id: GroupId,
    /// Creation instant; persisted as ISO-8601 text.
    pub created_at: DateTime<Utc>,
    /// Open mapping of dynamic fields.
    #[serde(default)]
    pub data: FieldMap,
}

impl Contact {
    /// Creates a contact with a generated ID and the current timestamp.
    pub fn new(group_id: GroupId, data: FieldMap) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            created_at: Utc::now(),
            data,
        }
    }
}
