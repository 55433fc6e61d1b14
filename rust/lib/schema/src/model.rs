use serde::{Deserialize, Serialize};

use crate::kind::FieldKind;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// Target of a foreign-key column: `table(field)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    pub table: String,
    pub field: String,
}

impl References {
    pub fn new(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            field: field.into(),
        }
    }

    /// Both sides named. An incomplete target never reaches the DDL.
    pub fn is_complete(&self) -> bool {
        !self.table.is_empty() && !self.field.is_empty()
    }
}

/// One table column.
///
/// `sql_type` is the raw SQL token the user typed (`varchar(255)`, `uuid`,
/// `decimal(10,2)`, ...). It is emitted verbatim; [`Field::kind`] classifies
/// it into the closed [`FieldKind`] set for input and validator mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub sql_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_foreign_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<References>,
}

impl Field {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn foreign_key(mut self, table: impl Into<String>, field: impl Into<String>) -> Self {
        self.is_foreign_key = true;
        self.references = Some(References::new(table, field));
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn kind(&self) -> FieldKind {
        FieldKind::classify(&self.sql_type)
    }

    /// The foreign-key target, only when the field is flagged as a foreign
    /// key and the target is fully named.
    pub fn foreign_target(&self) -> Option<&References> {
        if !self.is_foreign_key {
            return None;
        }
        self.references.as_ref().filter(|r| r.is_complete())
    }
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexType {
    #[default]
    Btree,
    Hash,
    Gin,
    Gist,
}

impl IndexType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Btree => "btree",
            Self::Hash => "hash",
            Self::Gin => "gin",
            Self::Gist => "gist",
        }
    }
}

impl std::fmt::Display for IndexType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A secondary index. Only emitted when `fields` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub fields: Vec<String>,
    #[serde(rename = "type", default)]
    pub index_type: IndexType,
    #[serde(default)]
    pub unique: bool,
}

// ---------------------------------------------------------------------------
// Constraint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    Check,
    Unique,
    ForeignKey,
}

/// A table constraint. `definition` is a raw SQL expression for `check`
/// and a column list for `unique`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    #[serde(rename = "type")]
    pub constraint_type: ConstraintType,
    pub definition: String,
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// The full editable description of one table plus its page metadata.
/// This is the unit of change detection in [`crate::SchemaBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub page_title: String,
    #[serde(default)]
    pub page_subtitle: String,
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl Schema {
    /// `CREATE TABLE` DDL for the current state (empty when there is no
    /// table name or no field).
    pub fn sql(&self) -> String {
        crate::sql::emit_create_table(&self.table_name, &self.fields, &self.indexes, &self.constraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_wire_names() {
        let field = Field::new("categoria_id", "uuid").foreign_key("categorias", "id");
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "uuid");
        assert_eq!(json["isForeignKey"], true);
        assert_eq!(json["isPrimaryKey"], false);
        assert_eq!(json["references"]["table"], "categorias");
    }

    #[test]
    fn field_defaults_when_flags_missing() {
        let field: Field = serde_json::from_str(r#"{"name":"nome","type":"text"}"#).unwrap();
        assert!(!field.required);
        assert!(!field.is_foreign_key);
        assert!(field.references.is_none());
        assert!(field.description.is_empty());
    }

    #[test]
    fn foreign_target_requires_flag_and_complete_target() {
        let mut field = Field::new("autor_id", "uuid");
        field.references = Some(References::new("autores", "id"));
        assert!(field.foreign_target().is_none());

        field.is_foreign_key = true;
        assert_eq!(field.foreign_target().unwrap().table, "autores");

        field.references = Some(References::new("autores", ""));
        assert!(field.foreign_target().is_none());
    }

    #[test]
    fn index_and_constraint_type_names() {
        let index: Index =
            serde_json::from_str(r#"{"name":"idx","fields":["a"],"type":"gin","unique":false}"#).unwrap();
        assert_eq!(index.index_type, IndexType::Gin);

        let c = Constraint {
            name: "fk_x".into(),
            constraint_type: ConstraintType::ForeignKey,
            definition: "x".into(),
        };
        assert_eq!(serde_json::to_value(&c).unwrap()["type"], "foreign_key");
    }
}
