//! Tabular import pipeline.
//!
//! # Responsibility
//! - Parse an uploaded CSV or spreadsheet payload into one contact per data
//!   row, keyed by the header row.
//! - Replace the target group's column schema with the header-derived list.
//!
//! # Invariants
//! - Routing is by filename suffix: `.csv` (exact lowercase) selects the CSV
//!   parser, everything else the spreadsheet parser.
//! - Every imported contact carries exactly the header-derived keys; short
//!   rows pad with `""`, surplus cells are dropped, duplicate headers
//!   collapse last-wins.
//! - Blank cells and NaN sentinels normalize to `""`; all cell values land
//!   as text.
//! - Rows insert one at a time; the first failing insert aborts the run and
//!   earlier rows stay persisted.

use crate::model::contact::Contact;
use crate::model::field::{number_to_text, FieldMap, FieldValue};
use crate::model::group::GroupId;
use crate::repo::contact_repo::ContactRepository;
use crate::repo::group_repo::{GroupRepository, RepoError};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Cursor;
use std::time::Instant;

/// Cell texts treated as missing values, compared case-insensitively after
/// trimming.
const NA_SENTINELS: [&str; 3] = ["nan", "n/a", "null"];

pub type ImportResult<T> = Result<T, ImportError>;

/// Import-pipeline error.
#[derive(Debug)]
pub enum ImportError {
    /// Target group does not exist.
    GroupNotFound(GroupId),
    /// Payload cannot be parsed as a table; carries the parser message.
    BadInput(String),
    /// Persistence failure while writing the schema or a contact row.
    Repo(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GroupNotFound(id) => write!(f, "group not found: {id}"),
            Self::BadInput(message) => write!(f, "invalid table payload: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::GroupNotFound(_) => None,
            Self::BadInput(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of one import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    /// Number of contacts inserted.
    pub imported: usize,
    /// Header-derived column list now stored as the group's schema.
    pub columns: Vec<String>,
}

/// Imports a tabular payload into a group.
///
/// # Contract
/// - The group must already exist.
/// - The group's `column_schema` is replaced wholesale with the header row.
/// - One contact is created per data row, all values as text.
/// - Returns the inserted count plus the column list.
pub fn import_table<G: GroupRepository, C: ContactRepository>(
    groups: &G,
    contacts: &C,
    group_id: GroupId,
    filename: &str,
    payload: &[u8],
) -> ImportResult<ImportOutcome> {
    let started = Instant::now();
    let format = if filename.ends_with(".csv") {
        "csv"
    } else {
        "sheet"
    };
    info!(
        "event=import module=tabular status=start group_id={group_id} format={format} bytes={}",
        payload.len()
    );

    match run_import(groups, contacts, group_id, format, payload) {
        Ok(outcome) => {
            info!(
                "event=import module=tabular status=ok group_id={group_id} format={format} \
                 rows={} columns={} duration_ms={}",
                outcome.imported,
                outcome.columns.len(),
                started.elapsed().as_millis()
            );
            Ok(outcome)
        }
        Err(err) => {
            error!(
                "event=import module=tabular status=error group_id={group_id} format={format} \
                 duration_ms={} error_code={} error={err}",
                started.elapsed().as_millis(),
                import_error_code(&err)
            );
            Err(err)
        }
    }
}

fn run_import<G: GroupRepository, C: ContactRepository>(
    groups: &G,
    contacts: &C,
    group_id: GroupId,
    format: &str,
    payload: &[u8],
) -> ImportResult<ImportOutcome> {
    if groups.get_group(group_id)?.is_none() {
        return Err(ImportError::GroupNotFound(group_id));
    }

    let table = if format == "csv" {
        parse_csv(payload)?
    } else {
        parse_sheet(payload)?
    };

    groups.update_group_schema(group_id, &table.columns)?;

    let mut imported = 0usize;
    for row in &table.rows {
        let mut data = FieldMap::new();
        for (index, column) in table.columns.iter().enumerate() {
            let text = row.get(index).cloned().unwrap_or_default();
            data.insert(column.clone(), FieldValue::Text(text));
        }

        let contact = Contact::new(group_id, data);
        contacts.create_contact(&contact)?;
        imported += 1;
    }

    Ok(ImportOutcome {
        imported,
        columns: table.columns,
    })
}

fn import_error_code(err: &ImportError) -> &'static str {
    match err {
        ImportError::GroupNotFound(_) => "group_not_found",
        ImportError::BadInput(_) => "bad_input",
        ImportError::Repo(_) => "repo_error",
    }
}

/// Header row plus data rows, all cells normalized to text.
#[derive(Debug)]
struct ParsedTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn parse_csv(payload: &[u8]) -> ImportResult<ParsedTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(payload);

    let headers = reader
        .headers()
        .map_err(|err| ImportError::BadInput(format!("malformed CSV header: {err}")))?;
    let columns = name_columns(headers.iter().map(normalize_text_cell));
    if columns.is_empty() {
        return Err(ImportError::BadInput("no column headers".to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|err| ImportError::BadInput(format!("malformed CSV record: {err}")))?;
        rows.push(record.iter().map(normalize_text_cell).collect());
    }

    Ok(ParsedTable { columns, rows })
}

fn parse_sheet(payload: &[u8]) -> ImportResult<ParsedTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(payload))
        .map_err(|err| ImportError::BadInput(format!("unreadable spreadsheet: {err}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::BadInput("spreadsheet has no sheets".to_string()))?
        .map_err(|err| ImportError::BadInput(format!("unreadable first sheet: {err}")))?;

    let mut row_iter = range.rows();
    let header = row_iter
        .next()
        .ok_or_else(|| ImportError::BadInput("no column headers".to_string()))?;
    let columns = name_columns(header.iter().map(cell_to_text));
    if columns.is_empty() {
        return Err(ImportError::BadInput("no column headers".to_string()));
    }

    let rows = row_iter
        .map(|row| row.iter().map(cell_to_text).collect())
        .collect();

    Ok(ParsedTable { columns, rows })
}

/// Assigns final column names: header text as-is, with blank headers given
/// positional `column_<n>` placeholders so every field stays addressable.
fn name_columns(headers: impl Iterator<Item = String>) -> Vec<String> {
    headers
        .enumerate()
        .map(|(index, text)| {
            if text.trim().is_empty() {
                format!("column_{}", index + 1)
            } else {
                text
            }
        })
        .collect()
}

/// Normalizes one text cell: blank and NaN-sentinel cells become `""`,
/// anything else keeps its raw text.
fn normalize_text_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || NA_SENTINELS
            .iter()
            .any(|sentinel| trimmed.eq_ignore_ascii_case(sentinel))
    {
        return String::new();
    }
    raw.to_string()
}

/// Canonical text form of one spreadsheet cell.
fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => normalize_text_cell(text),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => {
            if value.is_finite() {
                number_to_text(*value)
            } else {
                String::new()
            }
        }
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => match value.as_datetime() {
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => String::new(),
        },
        Data::DateTimeIso(text) => text.clone(),
        Data::DurationIso(text) => text.clone(),
        Data::Error(_) => String::new(),
    }
}
