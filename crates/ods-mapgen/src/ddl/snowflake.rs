//! Cloud-warehouse (Snowflake-class) DDL dialect.

use crate::typemap::{doubled, NativeType, WIDE_TEXT_LEN};

use super::DdlDialect;

/// Snowflake-class dialect: `CREATE TABLE IF NOT EXISTS`, `TIMESTAMP_LTZ`
/// temporals, `_ROW_VERSION INT` bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct SnowflakeDialect;

impl DdlDialect for SnowflakeDialect {
    fn name(&self) -> &'static str {
        "snowflake"
    }

    fn display_name(&self) -> &'static str {
        "Snowflake"
    }

    fn physical_type(&self, native: NativeType, declared_length: u32) -> String {
        match native {
            NativeType::Number | NativeType::Integer | NativeType::Int | NativeType::Long => {
                "INT".to_string()
            }
            NativeType::Varchar | NativeType::Varchar2 => {
                format!("VARCHAR({})", doubled(declared_length))
            }
            NativeType::Char => format!("CHAR({})", doubled(declared_length)),
            NativeType::Float | NativeType::Double => "FLOAT".to_string(),
            NativeType::Date | NativeType::Timestamp | NativeType::Timestamp9 => {
                "TIMESTAMP_LTZ".to_string()
            }
            NativeType::Clob => format!("VARCHAR({})", WIDE_TEXT_LEN),
        }
    }

    fn row_version_column(&self) -> &'static str {
        "    _ROW_VERSION INT DEFAULT 0 NOT NULL,\n"
    }

    fn update_timestamp_column(&self) -> &'static str {
        "    ODS_UPDATE_DT_TM TIMESTAMPTZ DEFAULT SYSDATE() NOT NULL\n"
    }
}
