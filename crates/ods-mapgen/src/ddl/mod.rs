//! Migration DDL synthesis for the three target warehouses.
//!
//! Each target engine implements [`DdlDialect`] (Strategy pattern): the
//! physical type matrix plus the engine-specific bookkeeping column clauses
//! and structural extras. The drivers [`new_table_ddl`] and
//! [`enhancement_ddl`] share one text-building discipline: a leading
//! migration header carrying an explicit sequence number, the DDL body, and
//! (new-table mode) a `GRANT SELECT` templated against the `${schema}`
//! placeholder.
//!
//! Generation is all-or-nothing per artifact: an unsupported native type
//! aborts the artifact with full table/column/dialect context before any
//! text is handed back.

mod adw;
mod snowflake;
mod vertica;

pub use adw::AdwDialect;
pub use snowflake::SnowflakeDialect;
pub use vertica::VerticaDialect;

use tracing::info;

use crate::core::schema::{ColumnDescriptor, TableSchema};
use crate::error::{MapGenError, Result};
use crate::typemap::NativeType;

/// Explicit migration sequence counter, threaded through block emission.
#[derive(Debug, Default)]
pub struct MigrationSeq(u32);

impl MigrationSeq {
    /// Start a new sequence at zero; the first [`next`](Self::next) yields 1.
    pub fn new() -> Self {
        Self(0)
    }

    /// Advance and return the next migration id.
    pub fn next(&mut self) -> u32 {
        self.0 += 1;
        self.0
    }
}

/// SQL synthesis capability for one target warehouse.
pub trait DdlDialect {
    /// Short dialect tag used in logs and error context.
    fn name(&self) -> &'static str;

    /// Human-readable engine name used in migration headers.
    fn display_name(&self) -> &'static str;

    /// Physical DDL type for a whitelisted native type.
    fn physical_type(&self, native: NativeType, declared_length: u32) -> String;

    /// Leading keyword of the CREATE statement.
    fn create_table_keyword(&self) -> &'static str {
        "CREATE TABLE IF NOT EXISTS "
    }

    /// Synthesized row-version bookkeeping column line.
    fn row_version_column(&self) -> &'static str;

    /// Synthesized update-timestamp bookkeeping column line.
    fn update_timestamp_column(&self) -> &'static str;

    /// Migration header line with sequence number and description.
    fn migration_header(&self, migration_id: u32, description: &str, subject: &str) -> String {
        format!(
            "migration_id={},PHANALYTIC-(replace jira number):{} {}\n\n",
            migration_id, description, subject
        )
    }

    /// Guard inserted after ADD COLUMN in enhancement statements.
    fn add_column_guard(&self) -> &'static str {
        ""
    }

    /// Additional migration blocks emitted after the base table and grant.
    fn extra_blocks(&self, _schema: &TableSchema, _seq: &mut MigrationSeq) -> Result<String> {
        Ok(String::new())
    }
}

/// Parse a descriptor's native type, attaching artifact context on failure.
pub(crate) fn parse_native(
    dialect: &'static str,
    schema: &TableSchema,
    column: &ColumnDescriptor,
) -> Result<NativeType> {
    NativeType::parse(&column.native_type).ok_or_else(|| {
        MapGenError::unsupported(
            &schema.table_name,
            &column.name,
            &column.native_type,
            dialect,
        )
    })
}

/// `GRANT SELECT` statement templated against the schema placeholder.
fn grant_statement(table_name: &str) -> String {
    format!("GRANT SELECT ON  {} TO ${{schema}}_reader;\n\n", table_name)
}

/// Synthesize the full new-table migration text for one dialect.
pub fn new_table_ddl(dialect: &dyn DdlDialect, schema: &TableSchema) -> Result<String> {
    let mut seq = MigrationSeq::new();
    let mut ddl = String::new();

    ddl.push_str(&dialect.migration_header(
        seq.next(),
        &format!("Adding new {} table", dialect.display_name()),
        &schema.table_name,
    ));
    ddl.push_str(dialect.create_table_keyword());
    ddl.push_str(&schema.table_name);
    ddl.push_str(" (\n");

    for column in &schema.columns {
        let native = parse_native(dialect.name(), schema, column)?;
        ddl.push_str("    ");
        ddl.push_str(&column.name);
        ddl.push(' ');
        ddl.push_str(&dialect.physical_type(native, column.declared_length));
        if !column.nullable {
            ddl.push_str(" NOT NULL");
        }
        ddl.push_str(",\n");
    }

    ddl.push_str(dialect.row_version_column());
    ddl.push_str(dialect.update_timestamp_column());
    ddl.push_str(");\n\n");
    ddl.push_str(&grant_statement(&schema.table_name));
    ddl.push_str(&dialect.extra_blocks(schema, &mut seq)?);

    info!(
        table = %schema.table_name,
        dialect = dialect.name(),
        "generated new-table DDL"
    );
    Ok(ddl)
}

/// Synthesize incremental ALTER-style DDL for an enhancement run.
///
/// Columns are rendered with the *native* source type string, not the mapped
/// physical type. This asymmetry with the new-table path is deliberate and
/// preserved; see DESIGN.md before changing it.
pub fn enhancement_ddl(dialect: &dyn DdlDialect, schema: &TableSchema) -> String {
    let mut ddl = format!(
        "migration_id=1,PHANALYTIC-(replace jira number):Adding [{}] columns to table {}\n",
        schema.new_field_names.join(", "),
        schema.table_name
    );

    for column in &schema.columns {
        ddl.push_str("ALTER TABLE ${schema}.");
        ddl.push_str(&schema.table_name);
        ddl.push_str(" ADD COLUMN ");
        ddl.push_str(dialect.add_column_guard());
        ddl.push_str(&column.name);
        ddl.push(' ');
        ddl.push_str(&column.native_type);
        if !column.nullable {
            ddl.push_str(" NOT NULL");
        }
        if let Some(default) = &column.default_value {
            ddl.push_str(" DEFAULT ");
            ddl.push_str(default);
        }
        ddl.push_str(";\n");
    }

    info!(
        table = %schema.table_name,
        dialect = dialect.name(),
        "generated enhancement DDL"
    );
    ddl
}
