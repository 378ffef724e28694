//! Column model construction and default-value normalization.
//!
//! [`ColumnModelBuilder`] turns one raw metadata row into a
//! [`ColumnDescriptor`]. The default-value normalization here is applied
//! exactly once, so the mapping-document and DDL paths can never disagree on
//! a column's effective default.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::warn;

use crate::core::schema::{ColumnDescriptor, MetadataRow, TableSchema};
use crate::error::{MapGenError, Result};

/// Input format of `TO_DATE` literal defaults (`HH24` in the source dialect
/// is 24-hour `%H` here).
const TO_DATE_INPUT_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Normalized output format for date defaults.
const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";

static TO_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"TO_DATE\s*\(\s*'([^']*)'\s*,\s*'[^']*'\s*\)").expect("valid TO_DATE pattern")
});

/// Builds [`ColumnDescriptor`]s from raw metadata rows.
#[derive(Debug, Clone)]
pub struct ColumnModelBuilder<'a> {
    primary_keys: &'a [String],
}

impl<'a> ColumnModelBuilder<'a> {
    /// Create a builder tagging columns against the given primary-key list.
    pub fn new(primary_keys: &'a [String]) -> Self {
        Self { primary_keys }
    }

    /// Build one descriptor from a raw metadata row.
    pub fn build(&self, row: &MetadataRow) -> ColumnDescriptor {
        ColumnDescriptor {
            name: row.column_name.clone(),
            native_type: row.data_type.clone(),
            nullable: row.nullable,
            declared_length: row.data_length,
            default_value: normalize_default(
                &row.data_type,
                row.data_default.as_deref(),
                &row.column_name,
            ),
            is_primary_key: self.primary_keys.iter().any(|pk| pk == &row.column_name),
        }
    }
}

/// Normalize a raw column default.
///
/// Rules, in order:
/// - blank or absent defaults become absent;
/// - for date/timestamp natives, the sentinel tokens `SYSDATE` and
///   `SYS_EXTRACT_UTC(SYSTIMESTAMP)` become absent;
/// - a `TO_DATE('...','...')` expression is reformatted to `yyyy-MM-dd`,
///   dropping to absent with a diagnostic when it does not parse;
/// - the quoted single-space literal `' '` becomes a literal single space;
/// - anything else is kept, trimmed.
pub fn normalize_default(
    native_type: &str,
    raw_default: Option<&str>,
    column_name: &str,
) -> Option<String> {
    let trimmed = raw_default?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let is_temporal = native_type.eq_ignore_ascii_case("DATE")
        || native_type.eq_ignore_ascii_case("TIMESTAMP")
        || native_type.eq_ignore_ascii_case("TIMESTAMP(9)");

    if is_temporal
        && (trimmed.eq_ignore_ascii_case("SYSDATE")
            || trimmed.eq_ignore_ascii_case("SYS_EXTRACT_UTC(SYSTIMESTAMP)"))
    {
        return None;
    }

    let to_date_candidate = (native_type.eq_ignore_ascii_case("DATE")
        || native_type.eq_ignore_ascii_case("TIMESTAMP"))
        && trimmed.starts_with("TO_DATE(");
    if to_date_candidate {
        return match parse_to_date(trimmed, column_name) {
            Ok(date) => Some(date),
            Err(err) => {
                // Never fatal: the column just loses its default.
                warn!("dropping unparsable default: {}", err);
                None
            }
        };
    }

    if trimmed == "' '" {
        return Some(" ".to_string());
    }

    Some(trimmed.to_string())
}

/// Reformat a `TO_DATE('MM/dd/yyyy HH:mm:ss', ...)` literal to `yyyy-MM-dd`.
fn parse_to_date(expression: &str, column_name: &str) -> Result<String> {
    let captures = TO_DATE_RE.captures(expression).ok_or_else(|| {
        MapGenError::default_value(column_name, expression, "not a TO_DATE literal")
    })?;
    let literal = &captures[1];
    let parsed = NaiveDateTime::parse_from_str(literal, TO_DATE_INPUT_FORMAT)
        .map_err(|e| MapGenError::default_value(column_name, literal, e.to_string()))?;
    Ok(parsed.format(DATE_OUTPUT_FORMAT).to_string())
}

/// Keep only the metadata rows whose lowercase name appears in the
/// interface-definition field list.
pub fn filter_to_fields(rows: &[MetadataRow], fields: &[String]) -> Vec<MetadataRow> {
    rows.iter()
        .filter(|row| fields.contains(&row.column_name.to_lowercase()))
        .cloned()
        .collect()
}

/// Build the immutable [`TableSchema`] for a new-table run.
pub fn new_table_schema(
    table_name: &str,
    rows: &[MetadataRow],
    primary_keys: Vec<String>,
) -> TableSchema {
    let builder = ColumnModelBuilder::new(&primary_keys);
    let columns = rows.iter().map(|row| builder.build(row)).collect();
    TableSchema {
        table_name: table_name.to_string(),
        columns,
        primary_keys,
        is_enhancement: false,
        new_field_names: vec![],
    }
}

/// Build the [`TableSchema`] for an enhancement run.
///
/// Enhancement runs carry no primary-key information, so no column is
/// tagged as a key.
pub fn enhancement_schema(
    table_name: &str,
    rows: &[MetadataRow],
    new_field_names: Vec<String>,
) -> TableSchema {
    let builder = ColumnModelBuilder::new(&[]);
    let columns = rows.iter().map(|row| builder.build(row)).collect();
    TableSchema {
        table_name: table_name.to_string(),
        columns,
        primary_keys: vec![],
        is_enhancement: true,
        new_field_names,
    }
}
