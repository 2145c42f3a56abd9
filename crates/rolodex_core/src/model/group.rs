//! Group domain model.
//!
//! # Responsibility
//! - Define the named container that contacts belong to.
//! - Carry the advisory column schema shared by a group's contacts.
//!
//! # Invariants
//! - `id` is stable and never reused for another group.
//! - `created_at` is captured once at construction.
//! - `column_schema` order is whatever the last import or explicit update
//!   wrote; duplicates are permitted and nothing cross-checks it against
//!   actual contact data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a group.
pub type GroupId = Uuid;

/// A named collection of contacts sharing one advisory column schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Stable global ID, assigned at creation.
    pub id: GroupId,
    /// Required display label. Not content-validated.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Creation instant; persisted as ISO-8601 text.
    pub created_at: DateTime<Utc>,
    /// Ordered field names the group's contacts are expected to carry.
    ///
    /// Replaced wholesale by each tabular import and by explicit schema
    /// updates; advisory only.
    #[serde(default)]
    pub column_schema: Vec<String>,
}

impl Group {
    /// Creates a group with a generated ID and the current timestamp.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            created_at: Utc::now(),
            column_schema: Vec::new(),
        }
    }
}
