//! Top-level generation drivers.
//!
//! One call per workflow: [`generate_new_table`] produces the complete
//! artifact set for onboarding a table (mapping document plus DDL for all
//! three warehouses), [`generate_enhancement`] produces the reduced set for
//! adding columns to an existing table. Either everything is produced or the
//! run fails with the first error; no partial artifact set is returned.

use tracing::info;
use uuid::Uuid;

use crate::core::schema::{InterfaceDefinition, MetadataRow};
use crate::ddl::{self, AdwDialect, SnowflakeDialect, VerticaDialect};
use crate::error::Result;
use crate::{encode, mapping, model};

/// Inputs for onboarding one new table.
#[derive(Debug, Clone)]
pub struct NewTableRequest {
    /// Target table name.
    pub table_name: String,

    /// Raw column metadata snapshot.
    pub metadata: Vec<MetadataRow>,

    /// Primary-key column names in key order.
    pub primary_keys: Vec<String>,

    /// Parsed interface-definition snapshot.
    pub interface: InterfaceDefinition,

    /// Entity-type suffix composed into the record type.
    pub entity_type: String,

    /// Caller-supplied mapping id; a fresh one is generated when absent.
    pub mapping_id: Option<String>,
}

/// Complete artifact set for a new-table run.
#[derive(Debug, Clone)]
pub struct NewTableArtifacts {
    /// The mapping id actually used (supplied or generated).
    pub mapping_id: String,

    /// Assembled mapping document.
    pub mapping_document: mapping::MappingDocument,

    /// Pretty-printed mapping JSON.
    pub mapping_json: String,

    /// Compacted single-line mapping JSON.
    pub mapping_json_compact: String,

    pub snowflake_ddl: String,
    pub adw_ddl: String,
    pub vertica_ddl: String,
}

impl NewTableArtifacts {
    /// Label under which the caller persists the mapping document.
    pub fn mapping_label(&self) -> &str {
        &self.mapping_id
    }

    /// Label for a DDL artifact, suffixed with the dialect tag.
    pub fn ddl_label(&self, dialect: &dyn crate::ddl::DdlDialect) -> String {
        format!("{}-{}", self.mapping_id, dialect.name())
    }
}

/// Inputs for an add-columns enhancement run.
#[derive(Debug, Clone)]
pub struct EnhancementRequest {
    /// Target table name.
    pub table_name: String,

    /// Metadata rows for the columns being added.
    pub metadata: Vec<MetadataRow>,

    /// Names of the new fields, used in the migration header.
    pub new_fields: Vec<String>,

    /// Record identifier of the already-onboarded table.
    pub record_id: String,
}

/// Reduced artifact set for an enhancement run. No relational-warehouse DDL
/// and no compact JSON variant.
#[derive(Debug, Clone)]
pub struct EnhancementArtifacts {
    /// Assembled partial mapping document.
    pub mapping_document: mapping::MappingDocument,

    /// Pretty-printed mapping JSON.
    pub mapping_json: String,

    pub snowflake_ddl: String,
    pub vertica_ddl: String,
}

/// Run the full new-table workflow.
///
/// The record identity is resolved first, so a definition without a usable
/// record type aborts before any artifact is built. Metadata rows whose
/// lowercase name is not declared by the interface definition are dropped
/// from every artifact.
pub fn generate_new_table(request: &NewTableRequest) -> Result<NewTableArtifacts> {
    let record_id = request.interface.record_id()?;

    let rows = model::filter_to_fields(&request.metadata, &request.interface.fields);
    if rows.len() < request.metadata.len() {
        info!(
            table = %request.table_name,
            dropped = request.metadata.len() - rows.len(),
            "dropped metadata columns not declared by the interface definition"
        );
    }
    let schema = model::new_table_schema(&request.table_name, &rows, request.primary_keys.clone());

    let mapping_id = request
        .mapping_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let document = mapping::assemble(
        mapping::build_record_map(&schema, &record_id),
        mapping::build_target_models(&schema)?,
        Some(mapping_id.clone()),
        &request.entity_type,
        encode::encode_schema(&request.interface.schema_text),
    );

    let artifacts = NewTableArtifacts {
        mapping_id,
        mapping_json: document.to_pretty()?,
        mapping_json_compact: document.to_compact()?,
        snowflake_ddl: ddl::new_table_ddl(&SnowflakeDialect, &schema)?,
        adw_ddl: ddl::new_table_ddl(&AdwDialect, &schema)?,
        vertica_ddl: ddl::new_table_ddl(&VerticaDialect, &schema)?,
        mapping_document: document,
    };

    info!(
        table = %request.table_name,
        record_id = %record_id,
        mapping_id = %artifacts.mapping_id,
        columns = schema.columns.len(),
        "generated new-table artifacts"
    );
    Ok(artifacts)
}

/// Run the enhancement workflow for one batch of added columns.
pub fn generate_enhancement(request: &EnhancementRequest) -> Result<EnhancementArtifacts> {
    let schema = model::enhancement_schema(
        &request.table_name,
        &request.metadata,
        request.new_fields.clone(),
    );

    let document = mapping::assemble_enhancement(
        mapping::build_record_map(&schema, &request.record_id),
        mapping::build_target_models(&schema)?,
    );

    let artifacts = EnhancementArtifacts {
        mapping_json: document.to_pretty()?,
        snowflake_ddl: ddl::enhancement_ddl(&SnowflakeDialect, &schema),
        vertica_ddl: ddl::enhancement_ddl(&VerticaDialect, &schema),
        mapping_document: document,
    };

    info!(
        table = %request.table_name,
        columns = schema.columns.len(),
        "generated enhancement artifacts"
    );
    Ok(artifacts)
}
