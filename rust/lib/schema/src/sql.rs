/// SQL DDL emitter
///
/// Identifiers and definitions are written as typed. The output is meant to
/// be read and copied by the developer who authored the schema; it must not
/// be fed from untrusted input without adding identifier escaping.

use crate::model::{Constraint, ConstraintType, Field, Index};

/// Render `CREATE TABLE` plus one `CREATE INDEX` per index that names at
/// least one column. Returns an empty string when the table name or the
/// field list is empty.
pub fn emit_create_table(
    table_name: &str,
    fields: &[Field],
    indexes: &[Index],
    constraints: &[Constraint],
) -> String {
    if table_name.is_empty() || fields.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = fields.iter().map(column_clause).collect();
    lines.extend(constraints.iter().filter_map(constraint_clause));

    let mut sql = String::new();
    sql.push_str(&format!("CREATE TABLE {} (\n", table_name));
    for (i, line) in lines.iter().enumerate() {
        sql.push_str("  ");
        sql.push_str(line);
        if i < lines.len() - 1 {
            sql.push_str(",\n");
        } else {
            sql.push('\n');
        }
    }
    sql.push_str(");");

    let statements: Vec<String> = indexes
        .iter()
        .filter(|index| !index.fields.is_empty())
        .map(|index| create_index(table_name, index))
        .collect();
    if !statements.is_empty() {
        sql.push_str("\n\n");
        sql.push_str(&statements.join("\n"));
    }

    sql
}

/// `name type [NOT NULL] [PRIMARY KEY] [REFERENCES table(field)]`
fn column_clause(field: &Field) -> String {
    let mut clause = format!("{} {}", field.name, field.sql_type);

    if field.required {
        clause.push_str(" NOT NULL");
    }

    if field.is_primary_key {
        clause.push_str(" PRIMARY KEY");
    }

    if let Some(target) = field.foreign_target() {
        clause.push_str(&format!(" REFERENCES {}({})", target.table, target.field));
    }

    clause
}

// Foreign keys are rendered inline on their column, never as table constraints.
fn constraint_clause(constraint: &Constraint) -> Option<String> {
    match constraint.constraint_type {
        ConstraintType::Check => Some(format!(
            "CONSTRAINT {} CHECK ({})",
            constraint.name, constraint.definition
        )),
        ConstraintType::Unique => Some(format!(
            "CONSTRAINT {} UNIQUE ({})",
            constraint.name, constraint.definition
        )),
        ConstraintType::ForeignKey => None,
    }
}

fn create_index(table_name: &str, index: &Index) -> String {
    let unique = if index.unique { "UNIQUE " } else { "" };
    format!(
        "CREATE {}INDEX {} ON {} USING {} ({});",
        unique,
        index.name,
        table_name,
        index.index_type,
        index.fields.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IndexType, References};

    fn produtos_fields() -> Vec<Field> {
        vec![
            Field::new("id", "uuid").primary_key().required(),
            Field::new("preco", "decimal").required(),
        ]
    }

    #[test]
    fn empty_inputs_emit_nothing() {
        assert_eq!(emit_create_table("", &produtos_fields(), &[], &[]), "");
        assert_eq!(emit_create_table("produtos", &[], &[], &[]), "");
        assert_eq!(emit_create_table("", &[], &[], &[]), "");
    }

    #[test]
    fn produtos_table() {
        let sql = emit_create_table("produtos", &produtos_fields(), &[], &[]);
        assert_eq!(
            sql,
            "CREATE TABLE produtos (\n  id uuid NOT NULL PRIMARY KEY,\n  preco decimal NOT NULL\n);"
        );
    }

    #[test]
    fn foreign_key_inline_reference() {
        let fields = vec![Field::new("categoria_id", "uuid").foreign_key("categorias", "id")];
        let sql = emit_create_table("produtos", &fields, &[], &[]);
        assert!(sql.contains("categoria_id uuid REFERENCES categorias(id)"));
    }

    #[test]
    fn foreign_key_without_target_has_no_reference() {
        let mut missing = Field::new("autor_id", "uuid");
        missing.is_foreign_key = true;
        let mut blank = Field::new("editora_id", "uuid");
        blank.is_foreign_key = true;
        blank.references = Some(References::new("", ""));

        let sql = emit_create_table("livros", &[missing, blank], &[], &[]);
        assert!(!sql.contains("REFERENCES"));
        assert!(sql.contains("autor_id uuid,"));
    }

    #[test]
    fn constraints_follow_columns_and_skip_foreign_keys() {
        let constraints = vec![
            Constraint {
                name: "ck_preco".into(),
                constraint_type: ConstraintType::Check,
                definition: "preco >= 0".into(),
            },
            Constraint {
                name: "fk_categoria_id".into(),
                constraint_type: ConstraintType::ForeignKey,
                definition: "categoria_id REFERENCES categorias(id)".into(),
            },
            Constraint {
                name: "uk_codigo".into(),
                constraint_type: ConstraintType::Unique,
                definition: "codigo".into(),
            },
        ];
        let fields = vec![
            Field::new("preco", "decimal").required(),
            Field::new("codigo", "varchar(50)"),
        ];
        let sql = emit_create_table("produtos", &fields, &[], &constraints);
        assert_eq!(
            sql,
            "CREATE TABLE produtos (\n  preco decimal NOT NULL,\n  codigo varchar(50),\n  CONSTRAINT ck_preco CHECK (preco >= 0),\n  CONSTRAINT uk_codigo UNIQUE (codigo)\n);"
        );
        assert!(!sql.contains("fk_categoria_id"));
    }

    #[test]
    fn indexes_emitted_after_table() {
        let indexes = vec![
            Index {
                name: "idx_email".into(),
                fields: vec!["email".into()],
                index_type: IndexType::Btree,
                unique: true,
            },
            Index {
                name: "idx_empty".into(),
                fields: vec![],
                index_type: IndexType::Btree,
                unique: false,
            },
            Index {
                name: "idx_nome_ativo".into(),
                fields: vec!["nome".into(), "ativo".into()],
                index_type: IndexType::Hash,
                unique: false,
            },
        ];
        let fields = vec![Field::new("email", "text"), Field::new("nome", "text")];
        let sql = emit_create_table("usuarios", &fields, &indexes, &[]);

        assert!(sql.ends_with(
            ");\n\nCREATE UNIQUE INDEX idx_email ON usuarios USING btree (email);\nCREATE INDEX idx_nome_ativo ON usuarios USING hash (nome, ativo);"
        ));
        assert!(!sql.contains("idx_empty"));
    }
}
