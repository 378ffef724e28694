//! Core schema types shared by the mapping-document and DDL stages.

pub mod schema;

pub use schema::{ColumnDescriptor, InterfaceDefinition, MetadataRow, TableSchema};
