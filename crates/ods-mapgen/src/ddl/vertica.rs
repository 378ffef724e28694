//! MPP-warehouse (Vertica-class) DDL dialect.
//!
//! Beyond the base table this dialect emits two more migration blocks: a
//! `_SUPER` projection ordered by the primary-key list and segmented by hash
//! of the first key, and a `_TEMP` global temporary mirror bracketed by
//! search-path switches. A table without primary keys still generates, with
//! a literal placeholder token in the ORDER BY and SEGMENTED BY clauses that
//! the operator must replace by hand.

use tracing::warn;

use crate::core::schema::TableSchema;
use crate::error::Result;
use crate::typemap::{doubled, NativeType, WIDE_TEXT_LEN};

use super::{parse_native, DdlDialect, MigrationSeq};

/// Token emitted in place of a key column when the table declares none.
pub const KEY_PLACEHOLDER: &str = "replace";

/// Vertica-class dialect.
#[derive(Debug, Clone, Default)]
pub struct VerticaDialect;

impl DdlDialect for VerticaDialect {
    fn name(&self) -> &'static str {
        "vertica"
    }

    fn display_name(&self) -> &'static str {
        "Vertica"
    }

    fn physical_type(&self, native: NativeType, declared_length: u32) -> String {
        match native {
            NativeType::Number | NativeType::Integer | NativeType::Int | NativeType::Long => {
                "INTEGER".to_string()
            }
            NativeType::Varchar | NativeType::Varchar2 => {
                format!("VARCHAR({})", doubled(declared_length))
            }
            NativeType::Char => format!("CHAR({})", doubled(declared_length)),
            NativeType::Float | NativeType::Double => "FLOAT".to_string(),
            NativeType::Date | NativeType::Timestamp | NativeType::Timestamp9 => {
                "TIMESTAMPTZ".to_string()
            }
            NativeType::Clob => format!("VARCHAR({})", WIDE_TEXT_LEN),
        }
    }

    fn row_version_column(&self) -> &'static str {
        "    _ROW_VERSION int NOT NULL DEFAULT 0,\n"
    }

    fn update_timestamp_column(&self) -> &'static str {
        "    ODS_UPDATE_DT_TM TIMESTAMPTZ DEFAULT SYSDATE() NOT NULL\n"
    }

    fn add_column_guard(&self) -> &'static str {
        "IF NOT EXISTS "
    }

    fn extra_blocks(&self, schema: &TableSchema, seq: &mut MigrationSeq) -> Result<String> {
        let mut ddl = self.projection_block(schema, seq);
        ddl.push_str(&self.temp_table_block(schema, seq)?);
        Ok(ddl)
    }
}

impl VerticaDialect {
    /// `<table>_SUPER` projection over every column plus the bookkeeping pair.
    fn projection_block(&self, schema: &TableSchema, seq: &mut MigrationSeq) -> String {
        let table = &schema.table_name;
        let mut ddl = self.migration_header(
            seq.next(),
            "Adding new Vertica projection",
            &format!("{}_SUPER", table),
        );

        ddl.push_str("CREATE PROJECTION IF NOT EXISTS ");
        ddl.push_str(table);
        ddl.push_str("_SUPER (\n");
        for column in &schema.columns {
            ddl.push_str("    ");
            ddl.push_str(&column.name);
            ddl.push_str(",\n");
        }
        ddl.push_str("    _ROW_VERSION,\n    ODS_UPDATE_DT_TM\n) AS SELECT \n");
        for column in &schema.columns {
            ddl.push_str("    ");
            ddl.push_str(&column.name);
            ddl.push_str(",\n");
        }
        ddl.push_str("    _ROW_VERSION,\n    ODS_UPDATE_DT_TM\n FROM ");
        ddl.push_str(table);
        ddl.push_str("\n ORDER BY \n");

        if schema.has_pk() {
            let keys = schema
                .primary_keys
                .iter()
                .map(|pk| format!("    {}", pk))
                .collect::<Vec<_>>()
                .join(",\n");
            ddl.push_str(&keys);
        } else {
            warn!(
                table = %table,
                "table has no primary keys; emitting '{}' placeholder in projection clauses",
                KEY_PLACEHOLDER
            );
            ddl.push_str("   ");
            ddl.push_str(KEY_PLACEHOLDER);
        }

        ddl.push_str("\n SEGMENTED BY HASH(");
        // Multi-key tables segment on the first key only.
        ddl.push_str(schema.first_primary_key().unwrap_or(KEY_PLACEHOLDER));
        ddl.push_str(") ALL NODES KSAFE 1;\n\n");
        ddl
    }

    /// `<table>_TEMP` global temporary mirror with untyped bookkeeping columns.
    fn temp_table_block(&self, schema: &TableSchema, seq: &mut MigrationSeq) -> Result<String> {
        let table = &schema.table_name;
        let mut ddl = self.migration_header(
            seq.next(),
            "Adding new Vertica temp table",
            &format!("{}_TEMP", table),
        );

        ddl.push_str("SET SEARCH_PATH TO public;\n\n");
        ddl.push_str("CREATE GLOBAL TEMPORARY TABLE IF NOT EXISTS ");
        ddl.push_str(table);
        ddl.push_str("_TEMP (\n");
        for column in &schema.columns {
            let native = parse_native(self.name(), schema, column)?;
            ddl.push_str("    ");
            ddl.push_str(&column.name);
            ddl.push(' ');
            ddl.push_str(&self.physical_type(native, column.declared_length));
            ddl.push_str(",\n");
        }
        ddl.push_str("    _ROW_VERSION INT,\n    ODS_UPDATE_DT_TM TIMESTAMPTZ\n);\n\n");
        ddl.push_str("SET SEARCH_PATH TO ${schema};\n\n");
        Ok(ddl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::MetadataRow;
    use crate::ddl::new_table_ddl;
    use crate::model;

    fn row(name: &str, data_type: &str, nullable: bool, length: u32) -> MetadataRow {
        MetadataRow {
            column_name: name.to_string(),
            data_type: data_type.to_string(),
            nullable,
            data_default: None,
            data_length: length,
        }
    }

    fn schema_with_keys(keys: Vec<String>) -> crate::core::schema::TableSchema {
        model::new_table_schema(
            "ENCOUNTER",
            &[
                row("ENCNTR_ID", "NUMBER", false, 22),
                row("REASON", "VARCHAR2", true, 100),
            ],
            keys,
        )
    }

    #[test]
    fn test_three_migration_blocks() {
        let ddl = new_table_ddl(&VerticaDialect, &schema_with_keys(vec!["ENCNTR_ID".into()]))
            .unwrap();
        assert!(ddl.contains("migration_id=1,PHANALYTIC-(replace jira number):Adding new Vertica table ENCOUNTER\n"));
        assert!(ddl.contains("migration_id=2,PHANALYTIC-(replace jira number):Adding new Vertica projection ENCOUNTER_SUPER\n"));
        assert!(ddl.contains("migration_id=3,PHANALYTIC-(replace jira number):Adding new Vertica temp table ENCOUNTER_TEMP\n"));
    }

    #[test]
    fn test_projection_orders_and_segments_by_key() {
        let ddl = new_table_ddl(&VerticaDialect, &schema_with_keys(vec!["ENCNTR_ID".into()]))
            .unwrap();
        assert!(ddl.contains("CREATE PROJECTION IF NOT EXISTS ENCOUNTER_SUPER (\n"));
        assert!(ddl.contains(" FROM ENCOUNTER\n ORDER BY \n    ENCNTR_ID\n"));
        assert!(ddl.contains(" SEGMENTED BY HASH(ENCNTR_ID) ALL NODES KSAFE 1;\n"));
        assert!(ddl.contains("    _ROW_VERSION,\n    ODS_UPDATE_DT_TM\n) AS SELECT \n"));
    }

    #[test]
    fn test_multi_key_segments_on_first_key_only() {
        let ddl = new_table_ddl(
            &VerticaDialect,
            &schema_with_keys(vec!["ENCNTR_ID".into(), "REASON".into()]),
        )
        .unwrap();
        assert!(ddl.contains(" ORDER BY \n    ENCNTR_ID,\n    REASON\n"));
        assert!(ddl.contains("SEGMENTED BY HASH(ENCNTR_ID) ALL NODES"));
        assert!(!ddl.contains("HASH(ENCNTR_ID, REASON)"));
    }

    #[test]
    fn test_keyless_table_emits_placeholder_not_error() {
        let ddl = new_table_ddl(&VerticaDialect, &schema_with_keys(vec![])).unwrap();
        assert!(ddl.contains(" ORDER BY \n   replace\n"));
        assert!(ddl.contains("SEGMENTED BY HASH(replace) ALL NODES"));
    }

    #[test]
    fn test_temp_mirror_block() {
        let ddl = new_table_ddl(&VerticaDialect, &schema_with_keys(vec!["ENCNTR_ID".into()]))
            .unwrap();
        assert!(ddl.contains("SET SEARCH_PATH TO public;\n\n"));
        assert!(ddl.contains("CREATE GLOBAL TEMPORARY TABLE IF NOT EXISTS ENCOUNTER_TEMP (\n"));
        assert!(ddl.contains("    ENCNTR_ID INTEGER,\n"));
        assert!(ddl.contains("    REASON VARCHAR(200),\n"));
        assert!(ddl.contains("    _ROW_VERSION INT,\n    ODS_UPDATE_DT_TM TIMESTAMPTZ\n);\n\n"));
        assert!(ddl.ends_with("SET SEARCH_PATH TO ${schema};\n\n"));
    }

    #[test]
    fn test_base_table_bookkeeping_lines() {
        let ddl = new_table_ddl(&VerticaDialect, &schema_with_keys(vec!["ENCNTR_ID".into()]))
            .unwrap();
        assert!(ddl.contains("    _ROW_VERSION int NOT NULL DEFAULT 0,\n"));
        assert!(ddl.contains("    ODS_UPDATE_DT_TM TIMESTAMPTZ DEFAULT SYSDATE() NOT NULL\n);\n"));
    }
}
