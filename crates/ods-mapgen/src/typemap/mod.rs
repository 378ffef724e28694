//! Native-to-logical type mapping and the shared sizing policy.
//!
//! Every type decision in the engine goes through this module: the
//! whitelist of accepted native types ([`NativeType::parse`]), the
//! dialect-neutral logical tags used in the mapping document
//! ([`LogicalType`]), and the sizing rules shared by the mapping-document
//! and DDL paths ([`doubled`], [`WIDE_TEXT_LEN`], [`calculate_length`]).
//!
//! Centralizing the whitelist in one parse function guarantees that the
//! logical mapper and all three dialect mappers reject unknown native types
//! identically; centralizing the sizing constants guarantees the mapping
//! document's `length` field and the DDL column widths cannot drift apart.
//!
//! Everything here is a pure function: no state, no side effects, safe to
//! call concurrently and memoize.

use serde::{Deserialize, Serialize};

/// Width used for large-object text renderings and for oversized strings in
/// the mapping document (e.g. CLOB -> VARCHAR(65000)).
pub const WIDE_TEXT_LEN: u32 = 65_000;

/// Declared length at or above which a string column is rendered at
/// [`WIDE_TEXT_LEN`] in the mapping document.
pub const WIDE_TEXT_THRESHOLD: u32 = 4_000;

/// Dialect sizing for variable-width text and char columns.
pub fn doubled(declared_length: u32) -> u32 {
    2 * declared_length
}

/// Parsed native type from the source dialect's whitelist.
///
/// The whitelist is the union of the per-dialect mapping tables; anything
/// outside it is rejected before any dialect-specific work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    Varchar,
    Varchar2,
    Char,
    Number,
    Integer,
    Int,
    Long,
    Date,
    Timestamp,
    /// High-precision timestamp declared as `TIMESTAMP(9)`.
    Timestamp9,
    Float,
    Double,
    Clob,
}

impl NativeType {
    /// Parse a raw native type name, case-insensitively.
    ///
    /// Returns `None` for any type outside the whitelist; callers convert
    /// that into an `UnsupportedType` error with table/column/dialect
    /// context.
    pub fn parse(raw: &str) -> Option<NativeType> {
        match raw.trim().to_uppercase().as_str() {
            "VARCHAR" => Some(NativeType::Varchar),
            "VARCHAR2" => Some(NativeType::Varchar2),
            "CHAR" => Some(NativeType::Char),
            "NUMBER" => Some(NativeType::Number),
            "INTEGER" => Some(NativeType::Integer),
            "INT" => Some(NativeType::Int),
            "LONG" => Some(NativeType::Long),
            "DATE" => Some(NativeType::Date),
            "TIMESTAMP" => Some(NativeType::Timestamp),
            "TIMESTAMP(9)" => Some(NativeType::Timestamp9),
            "FLOAT" => Some(NativeType::Float),
            "DOUBLE" => Some(NativeType::Double),
            "CLOB" => Some(NativeType::Clob),
            _ => None,
        }
    }

    /// Whether this is a date/timestamp-family type.
    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            NativeType::Date | NativeType::Timestamp | NativeType::Timestamp9
        )
    }
}

/// Dialect-neutral logical type tag used in the mapping document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalType {
    String,
    Long,
    Timestamp,
    Double,
}

impl LogicalType {
    /// The tag as it appears in the mapping document.
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalType::String => "STRING",
            LogicalType::Long => "LONG",
            LogicalType::Timestamp => "TIMESTAMP",
            LogicalType::Double => "DOUBLE",
        }
    }
}

impl std::fmt::Display for LogicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a native type to its dialect-neutral logical tag.
pub fn logical_type(native: NativeType) -> LogicalType {
    match native {
        NativeType::Varchar | NativeType::Varchar2 | NativeType::Char | NativeType::Clob => {
            LogicalType::String
        }
        NativeType::Number | NativeType::Integer | NativeType::Int | NativeType::Long => {
            LogicalType::Long
        }
        NativeType::Date | NativeType::Timestamp | NativeType::Timestamp9 => LogicalType::Timestamp,
        NativeType::Float | NativeType::Double => LogicalType::Double,
    }
}

/// Derive the mapping-document `length` for a column.
///
/// Keyed by the rendered logical tag, mirroring the dialect sizing rules:
/// oversized strings are pinned at [`WIDE_TEXT_LEN`], the sized logical
/// types are doubled, and any other tag carries no width (0).
pub fn calculate_length(logical: &str, declared_length: u32) -> u32 {
    match logical {
        "STRING" if declared_length >= WIDE_TEXT_THRESHOLD => WIDE_TEXT_LEN,
        "STRING" | "TIMESTAMP" | "FLOAT" | "DOUBLE" | "LONG" => doubled(declared_length),
        _ => 0,
    }
}
