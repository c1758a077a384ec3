//! Column display label derivation.

use crate::schema::{Column, Table};

/// Sentinel the export uses for enum-backed columns.
const USER_DEFINED: &str = "USER-DEFINED";

const KEY_MARKER: &str = "\u{1f511}";

/// Render the type portion of a column label.
///
/// The USER-DEFINED sentinel with a literal set renders as `ENUM: v1, v2`;
/// everything else is the declared type name upper-cased.
pub fn format_data_type(column: &Column) -> String {
    if column.data_type == USER_DEFINED {
        if !column.enums.is_empty() {
            return format!("ENUM: {}", column.enums.join(", "));
        }
        return column.data_type.clone();
    }
    column.data_type.to_uppercase()
}

/// Derive a column's display label.
///
/// Token order is fixed: key marker, name, parenthesized type, UNIQUE,
/// NOT NULL, GENERATED. The reference diagrams depend on this exact order.
pub fn format_column_label(table: &Table, column: &Column) -> String {
    let mut parts = vec![column.name.clone(), format!("({})", format_data_type(column))];

    if table.is_primary_key(&column.name) {
        parts.insert(0, KEY_MARKER.to_string());
    }
    if column.has_option("unique") {
        parts.push("UNIQUE".to_string());
    }
    if !column.has_option("nullable") {
        parts.push("NOT NULL".to_string());
    }
    if column.has_option("generated") {
        parts.push("GENERATED".to_string());
    }

    parts.join(" ")
}
