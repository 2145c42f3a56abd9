//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide contact persistence APIs over canonical `contacts` storage.
//! - Keep dynamic-field JSON encoding inside the persistence boundary.
//!
//! # Invariants
//! - `data` round-trips as a flat JSON object of scalars in a TEXT column.
//! - `update_contact_data` replaces the whole field map, never merges.
//! - Writes do not verify that `group_id` points at a live group; dangling
//!   references are legal and cleaned up only by the cascade delete.

use crate::model::contact::{Contact, ContactId};
use crate::model::field::FieldMap;
use crate::model::group::GroupId;
use crate::repo::group_repo::{
    ensure_schema_version, parse_timestamp, parse_uuid, table_exists, table_has_column, RepoError,
    RepoResult,
};
use rusqlite::{params, Connection, Row};

/// Hard cap on per-group contact listings, mirroring the store-side page limit.
pub const CONTACTS_LIST_CAP: u32 = 10_000;

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    group_id,
    created_at,
    data
FROM contacts";

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    /// Inserts one contact and returns its stable id.
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId>;
    /// Gets one contact by id.
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Lists a group's contacts in storage order, capped at
    /// `CONTACTS_LIST_CAP` rows.
    fn list_contacts_by_group(&self, group_id: GroupId) -> RepoResult<Vec<Contact>>;
    /// Replaces the whole dynamic-field map of one contact.
    fn update_contact_data(&self, id: ContactId, data: &FieldMap) -> RepoResult<()>;
    /// Deletes one contact.
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
    /// Deletes every contact of one group; returns the number removed.
    fn delete_contacts_by_group(&self, group_id: GroupId) -> RepoResult<usize>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_contact_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId> {
        let data_json = encode_field_map(&contact.data)?;

        self.conn.execute(
            "INSERT INTO contacts (
                id,
                group_id,
                created_at,
                data
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                contact.id.to_string(),
                contact.group_id.to_string(),
                contact.created_at.to_rfc3339(),
                data_json,
            ],
        )?;

        Ok(contact.id)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn list_contacts_by_group(&self, group_id: GroupId) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE group_id = ?1 LIMIT ?2;"))?;

        let mut rows = stmt.query(params![
            group_id.to_string(),
            i64::from(CONTACTS_LIST_CAP)
        ])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn update_contact_data(&self, id: ContactId, data: &FieldMap) -> RepoResult<()> {
        let data_json = encode_field_map(data)?;

        let changed = self.conn.execute(
            "UPDATE contacts SET data = ?2 WHERE id = ?1;",
            params![id.to_string(), data_json],
        )?;

        if changed == 0 {
            return Err(RepoError::ContactNotFound(id));
        }

        Ok(())
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::ContactNotFound(id));
        }

        Ok(())
    }

    fn delete_contacts_by_group(&self, group_id: GroupId) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM contacts WHERE group_id = ?1;",
            [group_id.to_string()],
        )?;

        Ok(changed)
    }
}

fn encode_field_map(data: &FieldMap) -> RepoResult<String> {
    serde_json::to_string(data)
        .map_err(|err| RepoError::InvalidData(format!("failed to encode contact data: {err}")))
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "contacts.id")?;

    let group_id_text: String = row.get("group_id")?;
    let group_id = parse_uuid(&group_id_text, "contacts.group_id")?;

    let created_at_text: String = row.get("created_at")?;
    let created_at = parse_timestamp(&created_at_text, "contacts.created_at")?;

    let data_text: String = row.get("data")?;
    let data: FieldMap = serde_json::from_str(&data_text).map_err(|err| {
        RepoError::InvalidData(format!("invalid field JSON in contacts.data: {err}"))
    })?;

    Ok(Contact {
        id,
        group_id,
        created_at,
        data,
    })
}

fn ensure_contact_connection_ready(conn: &Connection) -> RepoResult<()> {
    ensure_schema_version(conn)?;

    if !table_exists(conn, "contacts")? {
        return Err(RepoError::MissingRequiredTable("contacts"));
    }

    for column in ["id", "group_id", "created_at", "data"] {
        if !table_has_column(conn, "contacts", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "contacts",
                column,
            });
        }
    }

    Ok(())
}
