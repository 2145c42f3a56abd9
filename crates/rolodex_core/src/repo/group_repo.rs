//! Group repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `groups` storage.
//! - Keep SQL and JSON-column details inside the persistence boundary.
//!
//! # Invariants
//! - `column_schema` round-trips as a JSON array in a TEXT column; order and
//!   duplicates are preserved exactly as written.
//! - `delete_group` reports absence instead of erroring; the cascade over
//!   contacts is owned by the service layer, not by storage.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::db::migrations::latest_version;
use crate::model::contact::ContactId;
use crate::model::group::{Group, GroupId};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Hard cap on `list_groups` results, mirroring the store-side page limit.
pub const GROUPS_LIST_CAP: u32 = 1_000;

const GROUP_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    created_at,
    column_schema
FROM groups";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for group/contact persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target group does not exist.
    GroupNotFound(GroupId),
    /// Target contact does not exist.
    ContactNotFound(ContactId),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::GroupNotFound(id) => write!(f, "group not found: {id}"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "record store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "record store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "record store requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::GroupNotFound(_) => None,
            Self::ContactNotFound(_) => None,
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for group CRUD operations.
pub trait GroupRepository {
    /// Inserts one group and returns its stable id.
    fn create_group(&self, group: &Group) -> RepoResult<GroupId>;
    /// Gets one group by id.
    fn get_group(&self, id: GroupId) -> RepoResult<Option<Group>>;
    /// Lists groups in storage order, capped at `GROUPS_LIST_CAP` rows.
    fn list_groups(&self) -> RepoResult<Vec<Group>>;
    /// Replaces the whole column schema of one group.
    fn update_group_schema(&self, id: GroupId, columns: &[String]) -> RepoResult<()>;
    /// Deletes one group row; returns whether a row existed.
    fn delete_group(&self, id: GroupId) -> RepoResult<bool>;
}

/// SQLite-backed group repository.
pub struct SqliteGroupRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGroupRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_group_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl GroupRepository for SqliteGroupRepository<'_> {
    fn create_group(&self, group: &Group) -> RepoResult<GroupId> {
        let schema_json = encode_column_schema(&group.column_schema)?;

        self.conn.execute(
            "INSERT INTO groups (
                id,
                name,
                description,
                created_at,
                column_schema
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                group.id.to_string(),
                group.name.as_str(),
                group.description.as_deref(),
                group.created_at.to_rfc3339(),
                schema_json,
            ],
        )?;

        Ok(group.id)
    }

    fn get_group(&self, id: GroupId) -> RepoResult<Option<Group>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GROUP_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_group_row(row)?));
        }

        Ok(None)
    }

    fn list_groups(&self) -> RepoResult<Vec<Group>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GROUP_SELECT_SQL} LIMIT ?1;"))?;

        let mut rows = stmt.query([i64::from(GROUPS_LIST_CAP)])?;
        let mut groups = Vec::new();
        while let Some(row) = rows.next()? {
            groups.push(parse_group_row(row)?);
        }

        Ok(groups)
    }

    fn update_group_schema(&self, id: GroupId, columns: &[String]) -> RepoResult<()> {
        let schema_json = encode_column_schema(columns)?;

        let changed = self.conn.execute(
            "UPDATE groups SET column_schema = ?2 WHERE id = ?1;",
            params![id.to_string(), schema_json],
        )?;

        if changed == 0 {
            return Err(RepoError::GroupNotFound(id));
        }

        Ok(())
    }

    fn delete_group(&self, id: GroupId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM groups WHERE id = ?1;", [id.to_string()])?;

        Ok(changed > 0)
    }
}

fn encode_column_schema(columns: &[String]) -> RepoResult<String> {
    serde_json::to_string(columns)
        .map_err(|err| RepoError::InvalidData(format!("failed to encode column schema: {err}")))
}

fn parse_group_row(row: &Row<'_>) -> RepoResult<Group> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "groups.id")?;

    let created_at_text: String = row.get("created_at")?;
    let created_at = parse_timestamp(&created_at_text, "groups.created_at")?;

    let schema_text: String = row.get("column_schema")?;
    let column_schema: Vec<String> = serde_json::from_str(&schema_text).map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid schema JSON in groups.column_schema: {err}"
        ))
    })?;

    Ok(Group {
        id,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at,
        column_schema,
    })
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

pub(crate) fn parse_timestamp(value: &str, column: &'static str) -> RepoResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| RepoError::InvalidData(format!("invalid timestamp `{value}` in {column}")))
}

fn ensure_group_connection_ready(conn: &Connection) -> RepoResult<()> {
    ensure_schema_version(conn)?;

    if !table_exists(conn, "groups")? {
        return Err(RepoError::MissingRequiredTable("groups"));
    }

    for column in ["id", "name", "description", "created_at", "column_schema"] {
        if !table_has_column(conn, "groups", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "groups",
                column,
            });
        }
    }

    Ok(())
}

pub(crate) fn ensure_schema_version(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
