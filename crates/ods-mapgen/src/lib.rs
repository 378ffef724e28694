//! # ods-mapgen
//!
//! Schema translation engine for operational-data-store onboarding.
//!
//! Given a source table's column metadata and its parsed interface
//! definition, the engine generates the full onboarding artifact set:
//!
//! - **Model-mapping document** binding source record fields to target
//!   warehouse columns, with the raw interface schema embedded base64-encoded
//! - **Migration DDL** for three warehouse engines (Snowflake-class,
//!   ADW-class, Vertica-class), including projections and temp mirrors where
//!   the engine calls for them
//! - **Enhancement artifacts** (ALTER-style DDL plus a partial mapping
//!   document) for adding columns to an already-onboarded table
//!
//! ## Example
//!
//! ```rust,no_run
//! use ods_mapgen::{generate_new_table, InterfaceDefinition, NewTableRequest};
//!
//! fn main() -> ods_mapgen::Result<()> {
//!     let request = NewTableRequest {
//!         table_name: "PATIENT".to_string(),
//!         metadata: vec![],
//!         primary_keys: vec!["PATIENT_ID".to_string()],
//!         interface: InterfaceDefinition {
//!             schema_text: "{}".to_string(),
//!             fields: vec![],
//!             namespace: "com.example.ods".to_string(),
//!             record_name: "Patient".to_string(),
//!         },
//!         entity_type: "/name:Patient".to_string(),
//!         mapping_id: None,
//!     };
//!     let artifacts = generate_new_table(&request)?;
//!     println!("{}", artifacts.vertica_ddl);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod ddl;
pub mod encode;
pub mod error;
pub mod generator;
pub mod mapping;
pub mod model;
pub mod typemap;

// Re-exports for convenient access
pub use self::core::schema::{ColumnDescriptor, InterfaceDefinition, MetadataRow, TableSchema};
pub use ddl::{enhancement_ddl, new_table_ddl, AdwDialect, DdlDialect, SnowflakeDialect, VerticaDialect};
pub use error::{MapGenError, Result};
pub use generator::{
    generate_enhancement, generate_new_table, EnhancementArtifacts, EnhancementRequest,
    NewTableArtifacts, NewTableRequest,
};
pub use mapping::MappingDocument;
pub use typemap::{LogicalType, NativeType};
