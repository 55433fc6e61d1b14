use serde::{Deserialize, Serialize};

use crate::model::{Field, Schema};

/// A foreign-key link from one of the page's fields to another table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Local column name.
    pub field: String,
    /// Referenced table.
    pub table: String,
    /// Referenced column.
    pub column: String,
}

/// Frozen snapshot of a schema plus its output location, handed to the
/// page generator. Never mutated once a generation run starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGenerationConfig {
    pub page_title: String,
    #[serde(default)]
    pub page_subtitle: String,
    pub table_name: String,
    pub base_path: String,
    pub fields: Vec<Field>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    /// Replace files that already exist instead of failing the step.
    #[serde(default)]
    pub overwrite: bool,
}

impl PageGenerationConfig {
    /// Snapshot `schema`, deriving relationships from its foreign-key fields.
    pub fn from_schema(schema: &Schema, base_path: impl Into<String>) -> Self {
        Self {
            page_title: schema.page_title.clone(),
            page_subtitle: schema.page_subtitle.clone(),
            table_name: schema.table_name.clone(),
            base_path: base_path.into(),
            fields: schema.fields.clone(),
            relationships: relationships_from_fields(&schema.fields),
            overwrite: false,
        }
    }
}

pub fn relationships_from_fields(fields: &[Field]) -> Vec<Relationship> {
    fields
        .iter()
        .filter_map(|field| {
            field.foreign_target().map(|target| Relationship {
                field: field.name.clone(),
                table: target.table.clone(),
                column: target.field.clone(),
            })
        })
        .collect()
}
