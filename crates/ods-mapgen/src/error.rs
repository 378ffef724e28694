//! Error types for the mapping-generation library.

use thiserror::Error;

/// Main error type for mapping and DDL generation.
#[derive(Error, Debug)]
pub enum MapGenError {
    /// Native column type outside the supported whitelist.
    ///
    /// Fatal to the artifact being built; other artifacts for the same run
    /// may still be generated from the same metadata snapshot.
    #[error("unsupported native type '{native_type}' for {table}.{column} ({dialect})")]
    UnsupportedType {
        table: String,
        column: String,
        native_type: String,
        dialect: &'static str,
    },

    /// A column default failed to parse.
    ///
    /// Recovered locally: the default is dropped to absent with a diagnostic.
    #[error("could not parse default value '{value}' for column {column}: {reason}")]
    DefaultValue {
        column: String,
        value: String,
        reason: String,
    },

    /// Interface definition yields no record type.
    #[error("interface definition yields no record type: {0}")]
    MissingSchema(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Encoded schema is not valid base64.
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded schema is not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl MapGenError {
    /// Create an UnsupportedType error with full column context.
    pub fn unsupported(
        table: impl Into<String>,
        column: impl Into<String>,
        native_type: impl Into<String>,
        dialect: &'static str,
    ) -> Self {
        MapGenError::UnsupportedType {
            table: table.into(),
            column: column.into(),
            native_type: native_type.into(),
            dialect,
        }
    }

    /// Create a DefaultValue error.
    pub fn default_value(
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MapGenError::DefaultValue {
            column: column.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, MapGenError>;
