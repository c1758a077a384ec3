//! Schema loader for the JSON table export.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to read schema: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate table name: {0}")]
    DuplicateTable(String),
}

/// One table record from the schema export. Immutable after load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub primary_keys: Vec<String>,
    #[serde(default)]
    pub foreign_key_constraints: Vec<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(default = "default_data_type")]
    pub data_type: String,
    /// Modifier flags: "nullable", "unique", "generated". Unknown flags are ignored.
    #[serde(default)]
    pub options: Vec<String>,
    /// Allowed literals when `data_type` is the USER-DEFINED sentinel.
    #[serde(default)]
    pub enums: Vec<String>,
}

/// A declared reference between two columns, as dotted path strings
/// (e.g. `public.requests.requester_id`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForeignKey {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
}

fn default_data_type() -> String {
    "text".to_string()
}

impl Table {
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_keys.iter().any(|pk| pk == column)
    }
}

impl Column {
    pub fn has_option(&self, flag: &str) -> bool {
        self.options.iter().any(|o| o == flag)
    }
}

/// Parse a table list from the export JSON.
///
/// Duplicate table names are rejected: node identifiers are derived from
/// table names, and a duplicate would silently overwrite an earlier
/// table's lookup entries.
pub fn tables_from_json(json: &str) -> Result<Vec<Table>, SchemaError> {
    let tables: Vec<Table> = serde_json::from_str(json)?;
    check_unique_names(&tables)?;
    Ok(tables)
}

pub fn load_tables(path: &Path) -> Result<Vec<Table>, SchemaError> {
    let json = fs::read_to_string(path)?;
    tables_from_json(&json)
}

fn check_unique_names(tables: &[Table]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for table in tables {
        if !seen.insert(table.name.as_str()) {
            return Err(SchemaError::DuplicateTable(table.name.clone()));
        }
    }
    Ok(())
}
