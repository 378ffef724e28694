//! Model-mapping document assembly.
//!
//! Builds the record-map (source -> target column bindings) and the
//! target-model trees, and composes them with the encoded schema and
//! identifiers into the final mapping document. Enhancement runs use a
//! reduced form that omits the top-level `mappingId`, `version`, and
//! `recordType` keys entirely.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::schema::{ColumnDescriptor, TableSchema};
use crate::error::{MapGenError, Result};
use crate::typemap::{self, NativeType};

/// System tags carried by every target model and source-backed column.
const MODEL_USES: [&str; 2] = ["DataSyndication", "Vertica"];

/// Tag appended to primary-key columns.
const PRIMARY_KEY_USE: &str = "PrimaryKey";

/// Name of the synthesized row-version column.
pub const ROW_VERSION_COLUMN: &str = "_ROW_VERSION";

/// Serialization format tag embedded in the record type.
const RECORD_FORMAT: &str = "AVRO";

/// Prefix composed onto the caller-supplied entity type.
const ENTITY_TYPE_PREFIX: &str = "/source:string";

/// Top-level mapping document.
///
/// The optional fields are present for new-table documents and omitted
/// (not null) for enhancement documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    pub record_map: RecordMap,
    pub target_models: Vec<TargetModel>,
}

/// Source record identity: entity type, wire format, and the base64-encoded
/// raw interface-definition text (never the generated DDL).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordType {
    pub entity_type: String,
    pub format: String,
    pub schema: String,
}

/// Source-to-target column bindings for one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMap {
    pub record_id: String,
    pub target_maps: Vec<TargetMap>,
}

/// Column bindings against one target table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetMap {
    pub target_name: String,
    pub column_maps: Vec<ColumnBinding>,
}

/// One source-field-to-column binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnBinding {
    pub column_name: String,
    pub field_name: String,
    pub record_id: String,
}

/// Per-engine column list with usage tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetModel {
    pub name: String,
    pub uses: Vec<String>,
    pub columns: Vec<ColumnNode>,
}

/// One column within a target model.
///
/// The synthesized row-version column carries no `length` key, matching the
/// documents consumed downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnNode {
    pub name: String,
    pub uses: Vec<String>,
    #[serde(rename = "type")]
    pub logical_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    pub nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl MappingDocument {
    /// Pretty-printed document for the file artifact.
    pub fn to_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Compacted single-line variant of the same document.
    pub fn to_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build the record map binding every column to its lowercase field name.
pub fn build_record_map(schema: &TableSchema, record_id: &str) -> RecordMap {
    let column_maps = schema
        .columns
        .iter()
        .map(|column| ColumnBinding {
            column_name: column.name.clone(),
            field_name: column.name.to_lowercase(),
            record_id: record_id.to_string(),
        })
        .collect();

    RecordMap {
        record_id: record_id.to_string(),
        target_maps: vec![TargetMap {
            target_name: schema.table_name.clone(),
            column_maps,
        }],
    }
}

/// Build the target-model list for the table.
///
/// Every non-enhancement run appends exactly one synthesized row-version
/// column to the model (but never to the record map).
pub fn build_target_models(schema: &TableSchema) -> Result<Vec<TargetModel>> {
    let mut columns = schema
        .columns
        .iter()
        .map(|column| build_column_node(schema, column))
        .collect::<Result<Vec<_>>>()?;

    if !schema.is_enhancement {
        columns.push(row_version_node());
    }

    Ok(vec![TargetModel {
        name: schema.table_name.clone(),
        uses: MODEL_USES.iter().map(|s| s.to_string()).collect(),
        columns,
    }])
}

fn build_column_node(schema: &TableSchema, column: &ColumnDescriptor) -> Result<ColumnNode> {
    let native = NativeType::parse(&column.native_type).ok_or_else(|| {
        MapGenError::unsupported(
            &schema.table_name,
            &column.name,
            &column.native_type,
            "model mapping",
        )
    })?;
    let logical = typemap::logical_type(native);

    let mut uses: Vec<String> = MODEL_USES.iter().map(|s| s.to_string()).collect();
    if column.is_primary_key && schema.has_pk() {
        uses.push(PRIMARY_KEY_USE.to_string());
    }

    Ok(ColumnNode {
        name: column.name.clone(),
        uses,
        logical_type: logical.as_str().to_string(),
        length: Some(typemap::calculate_length(
            logical.as_str(),
            column.declared_length,
        )),
        nullable: column.nullable,
        default_value: column.default_value.clone(),
    })
}

fn row_version_node() -> ColumnNode {
    ColumnNode {
        name: ROW_VERSION_COLUMN.to_string(),
        uses: vec!["Warehouse".to_string(), "Version".to_string()],
        logical_type: "LONG".to_string(),
        length: None,
        nullable: false,
        default_value: Some("0".to_string()),
    }
}

/// Compose the full new-table mapping document.
///
/// `mapping_id` is caller-supplied or freshly generated; `encoded_schema` is
/// the base64 encoding of the raw interface-definition text.
pub fn assemble(
    record_map: RecordMap,
    target_models: Vec<TargetModel>,
    mapping_id: Option<String>,
    entity_type: &str,
    encoded_schema: String,
) -> MappingDocument {
    let mapping_id = mapping_id.unwrap_or_else(|| Uuid::new_v4().to_string());
    MappingDocument {
        mapping_id: Some(mapping_id),
        version: Some("1".to_string()),
        record_type: Some(RecordType {
            entity_type: format!("{}{}", ENTITY_TYPE_PREFIX, entity_type),
            format: RECORD_FORMAT.to_string(),
            schema: encoded_schema,
        }),
        record_map,
        target_models,
    }
}

/// Compose the reduced enhancement document: record map and target models
/// only, with no identity or record-type keys.
pub fn assemble_enhancement(
    record_map: RecordMap,
    target_models: Vec<TargetModel>,
) -> MappingDocument {
    MappingDocument {
        mapping_id: None,
        version: None,
        record_type: None,
        record_map,
        target_models,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::MetadataRow;
    use crate::model;

    fn patient_rows() -> Vec<MetadataRow> {
        vec![
            MetadataRow {
                column_name: "ID".to_string(),
                data_type: "NUMBER".to_string(),
                nullable: false,
                data_default: None,
                data_length: 22,
            },
            MetadataRow {
                column_name: "NAME".to_string(),
                data_type: "VARCHAR2".to_string(),
                nullable: true,
                data_default: None,
                data_length: 50,
            },
        ]
    }

    fn patient_schema() -> TableSchema {
        model::new_table_schema("PATIENT", &patient_rows(), vec!["ID".to_string()])
    }

    #[test]
    fn test_record_map_bindings_lowercase() {
        let record_map = build_record_map(&patient_schema(), "com.example.Patient");
        assert_eq!(record_map.record_id, "com.example.Patient");
        assert_eq!(record_map.target_maps.len(), 1);

        let target = &record_map.target_maps[0];
        assert_eq!(target.target_name, "PATIENT");
        assert_eq!(target.column_maps.len(), 2);
        assert_eq!(target.column_maps[0].column_name, "ID");
        assert_eq!(target.column_maps[0].field_name, "id");
        assert_eq!(target.column_maps[0].record_id, "com.example.Patient");
        assert_eq!(target.column_maps[1].field_name, "name");
    }

    #[test]
    fn test_target_models_append_row_version() {
        let models = build_target_models(&patient_schema()).unwrap();
        assert_eq!(models.len(), 1);

        let model = &models[0];
        assert_eq!(model.name, "PATIENT");
        assert_eq!(model.uses, vec!["DataSyndication", "Vertica"]);
        assert_eq!(model.columns.len(), 3);

        let id = &model.columns[0];
        assert!(id.uses.contains(&"PrimaryKey".to_string()));
        assert_eq!(id.logical_type, "LONG");
        assert_eq!(id.length, Some(44));
        assert!(!id.nullable);

        let name = &model.columns[1];
        assert!(!name.uses.contains(&"PrimaryKey".to_string()));
        assert_eq!(name.logical_type, "STRING");
        assert_eq!(name.length, Some(100));

        let row_version = &model.columns[2];
        assert_eq!(row_version.name, "_ROW_VERSION");
        assert_eq!(row_version.uses, vec!["Warehouse", "Version"]);
        assert_eq!(row_version.logical_type, "LONG");
        assert_eq!(row_version.length, None);
        assert!(!row_version.nullable);
        assert_eq!(row_version.default_value.as_deref(), Some("0"));
    }

    #[test]
    fn test_oversized_string_pinned_at_wide_length() {
        let rows = vec![MetadataRow {
            column_name: "LONG_TEXT".to_string(),
            data_type: "VARCHAR2".to_string(),
            nullable: true,
            data_default: None,
            data_length: 4000,
        }];
        let schema = model::new_table_schema("T", &rows, vec![]);
        let models = build_target_models(&schema).unwrap();
        assert_eq!(models[0].columns[0].length, Some(65_000));
    }

    #[test]
    fn test_enhancement_model_has_no_row_version() {
        let schema = model::enhancement_schema("PATIENT", &patient_rows(), vec![]);
        let models = build_target_models(&schema).unwrap();
        assert_eq!(models[0].columns.len(), 2);
        assert!(models[0].columns.iter().all(|c| c.name != "_ROW_VERSION"));
    }

    #[test]
    fn test_unsupported_type_carries_context() {
        let rows = vec![MetadataRow {
            column_name: "RAW_COL".to_string(),
            data_type: "RAW".to_string(),
            nullable: true,
            data_default: None,
            data_length: 16,
        }];
        let schema = model::new_table_schema("T", &rows, vec![]);
        let err = build_target_models(&schema).unwrap_err();
        assert!(matches!(
            err,
            MapGenError::UnsupportedType { ref column, .. } if column == "RAW_COL"
        ));
    }

    #[test]
    fn test_full_document_serialized_shape() {
        let schema = patient_schema();
        let document = assemble(
            build_record_map(&schema, "com.example.Patient"),
            build_target_models(&schema).unwrap(),
            Some("abc-123".to_string()),
            "/name:Patient",
            "e30=".to_string(),
        );
        let json: serde_json::Value =
            serde_json::from_str(&document.to_pretty().unwrap()).unwrap();

        assert_eq!(json["mappingId"], "abc-123");
        assert_eq!(json["version"], "1");
        assert_eq!(json["recordType"]["entityType"], "/source:string/name:Patient");
        assert_eq!(json["recordType"]["format"], "AVRO");
        assert_eq!(json["recordType"]["schema"], "e30=");
        assert_eq!(json["recordMap"]["recordId"], "com.example.Patient");
        assert_eq!(json["targetModels"][0]["columns"][2]["name"], "_ROW_VERSION");
        // Row-version node carries no length key.
        assert!(json["targetModels"][0]["columns"][2]
            .as_object()
            .unwrap()
            .get("length")
            .is_none());
    }

    #[test]
    fn test_enhancement_document_omits_identity_keys() {
        let schema = model::enhancement_schema("PATIENT", &patient_rows(), vec![]);
        let document = assemble_enhancement(
            build_record_map(&schema, "com.example.Patient"),
            build_target_models(&schema).unwrap(),
        );
        let compact = document.to_compact().unwrap();
        let json: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let keys = json.as_object().unwrap();

        assert!(!keys.contains_key("mappingId"));
        assert!(!keys.contains_key("version"));
        assert!(!keys.contains_key("recordType"));
        assert!(keys.contains_key("recordMap"));
        assert!(keys.contains_key("targetModels"));
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_fresh_mapping_id_generated_when_absent() {
        let schema = patient_schema();
        let document = assemble(
            build_record_map(&schema, "r"),
            build_target_models(&schema).unwrap(),
            None,
            "/e",
            String::new(),
        );
        let id = document.mapping_id.unwrap();
        assert_eq!(id.len(), 36);
    }
}
