//! Relational-warehouse (ADW-class) DDL dialect.

use crate::typemap::{doubled, NativeType};

use super::DdlDialect;

/// ADW-class dialect: plain `CREATE TABLE`, native `TIMESTAMP(9)` temporals,
/// numeric `ROW_VERSION` bookkeeping, no ticket tag in headers.
#[derive(Debug, Clone, Default)]
pub struct AdwDialect;

impl DdlDialect for AdwDialect {
    fn name(&self) -> &'static str {
        "adw"
    }

    fn display_name(&self) -> &'static str {
        "Oracle ADW"
    }

    fn physical_type(&self, native: NativeType, declared_length: u32) -> String {
        match native {
            NativeType::Number | NativeType::Integer | NativeType::Int | NativeType::Long => {
                "NUMBER".to_string()
            }
            NativeType::Varchar | NativeType::Varchar2 => {
                format!("VARCHAR2({})", doubled(declared_length))
            }
            NativeType::Char => format!("CHAR({})", doubled(declared_length)),
            NativeType::Float | NativeType::Double => "FLOAT".to_string(),
            NativeType::Date | NativeType::Timestamp | NativeType::Timestamp9 => {
                "TIMESTAMP(9)".to_string()
            }
            NativeType::Clob => "CLOB".to_string(),
        }
    }

    fn create_table_keyword(&self) -> &'static str {
        "CREATE TABLE "
    }

    fn row_version_column(&self) -> &'static str {
        "    ROW_VERSION NUMBER DEFAULT 0 NOT NULL,\n"
    }

    fn update_timestamp_column(&self) -> &'static str {
        "    ODS_UPDATE_DT_TM TIMESTAMP(9) DEFAULT SYSDATE \n"
    }

    fn migration_header(&self, migration_id: u32, description: &str, subject: &str) -> String {
        format!("migration_id={}, {} {}\n\n", migration_id, description, subject)
    }
}
