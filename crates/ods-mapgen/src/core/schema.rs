//! Schema and metadata types for source tables and interface definitions.
//!
//! These types are the immutable inputs to every generation stage. A
//! [`TableSchema`] is constructed once per run from a metadata snapshot and
//! then shared, unchanged, by the mapping-document assembler and the three
//! DDL synthesizers.

use serde::{Deserialize, Serialize};

use crate::error::{MapGenError, Result};

/// One raw column metadata row as delivered by the external extractor.
///
/// `data_default` is the raw default expression; normalization happens once
/// in [`crate::model::ColumnModelBuilder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataRow {
    /// Column name, case-preserving as given by the metadata source.
    pub column_name: String,

    /// Native type name in the source dialect (e.g. "VARCHAR2", "NUMBER").
    pub data_type: String,

    /// Whether the column allows NULL.
    pub nullable: bool,

    /// Raw default expression, if any.
    pub data_default: Option<String>,

    /// Declared length in source-dialect units.
    pub data_length: u32,
}

/// One physical column after normalization and primary-key tagging.
///
/// Constructed once per generation run and immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, case-preserving.
    pub name: String,

    /// Native type string from the source dialect, kept verbatim for the
    /// enhancement DDL path.
    pub native_type: String,

    /// Whether the column allows NULL.
    pub nullable: bool,

    /// Declared length in source-dialect units.
    pub declared_length: u32,

    /// Normalized default value (sentinels stripped, date literals
    /// reformatted to yyyy-MM-dd).
    pub default_value: Option<String>,

    /// Whether the column is part of the table's primary key.
    pub is_primary_key: bool,
}

/// An ordered column snapshot for one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name.
    pub table_name: String,

    /// Columns in source metadata order.
    pub columns: Vec<ColumnDescriptor>,

    /// Primary key column names in caller-supplied order. The order drives
    /// the MPP projection ORDER BY and segmentation clauses, so callers
    /// needing deterministic output must supply an ordered list.
    pub primary_keys: Vec<String>,

    /// Whether this schema describes an enhancement (add-columns) run.
    pub is_enhancement: bool,

    /// For enhancement runs, the names of the columns being added.
    pub new_field_names: Vec<String>,
}

impl TableSchema {
    /// Check if the table declares a primary key.
    pub fn has_pk(&self) -> bool {
        !self.primary_keys.is_empty()
    }

    /// First primary key in caller-supplied order, used for segmentation.
    pub fn first_primary_key(&self) -> Option<&str> {
        self.primary_keys.first().map(String::as_str)
    }
}

/// Parsed interface-definition snapshot delivered by the external parser.
///
/// The engine never parses the interface definition itself; it receives the
/// raw schema text (for transport encoding), the derived field-name list
/// (for metadata filtering), and the record identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceDefinition {
    /// Raw schema text, embedded base64-encoded in the mapping document.
    pub schema_text: String,

    /// Lowercase field names declared by the record.
    pub fields: Vec<String>,

    /// Record namespace.
    pub namespace: String,

    /// Record name.
    pub record_name: String,
}

impl InterfaceDefinition {
    /// Dot-joined `namespace.recordName` record identifier.
    ///
    /// Fails with [`MapGenError::MissingSchema`] when the definition carries
    /// no record type; this aborts the run before any artifact is built.
    pub fn record_id(&self) -> Result<String> {
        if self.record_name.trim().is_empty() {
            return Err(MapGenError::MissingSchema(
                "definition has no record name".to_string(),
            ));
        }
        if self.namespace.trim().is_empty() {
            return Err(MapGenError::MissingSchema(format!(
                "record '{}' has no namespace",
                self.record_name
            )));
        }
        Ok(format!("{}.{}", self.namespace, self.record_name))
    }
}
