//! Field, index and constraint suggestions keyed on the table name.
//!
//! Field suggestion is an ordered rule list: the first rule whose keyword is
//! contained in the normalized table name wins, even when a later rule
//! would be a more specific match. Indexes and constraints are derived from
//! an already-built field list, never from the table name.

use serde::Serialize;

use crate::model::{Constraint, ConstraintType, Field, Index, IndexType};

/// A keyword rule. Evaluated in [`RULES`] order.
struct Rule {
    keyword: &'static str,
    fields: fn() -> Vec<Field>,
}

impl Rule {
    fn matches(&self, normalized_table: &str) -> bool {
        normalized_table.contains(self.keyword)
    }
}

const RULES: &[Rule] = &[
    Rule {
        keyword: "usuarios",
        fields: usuarios_fields,
    },
    Rule {
        keyword: "produtos",
        fields: produtos_fields,
    },
    Rule {
        keyword: "categorias",
        fields: categorias_fields,
    },
];

fn usuarios_fields() -> Vec<Field> {
    vec![
        Field::new("nome", "varchar(255)").required().describe("Nome completo"),
        Field::new("email", "varchar(255)").required().describe("Endereço de e-mail"),
        Field::new("senha", "varchar(255)").required().describe("Hash da senha"),
        Field::new("ativo", "boolean").required().describe("Usuário ativo"),
    ]
}

fn produtos_fields() -> Vec<Field> {
    vec![
        Field::new("nome", "varchar(255)").required().describe("Nome do produto"),
        Field::new("descricao", "text").describe("Descrição"),
        Field::new("preco", "decimal(10,2)").required().describe("Preço de venda"),
        Field::new("estoque", "integer").required().describe("Quantidade em estoque"),
        Field::new("codigo", "varchar(50)").required().describe("Código interno"),
        Field::new("categoria_id", "uuid")
            .foreign_key("categorias", "id")
            .describe("Categoria"),
        Field::new("ativo", "boolean").required().describe("Produto ativo"),
    ]
}

fn categorias_fields() -> Vec<Field> {
    vec![
        Field::new("nome", "varchar(255)").required().describe("Nome da categoria"),
        Field::new("descricao", "text").describe("Descrição"),
        Field::new("ativo", "boolean").required().describe("Categoria ativa"),
    ]
}

/// `id`, `created_at`, `updated_at`. Every suggestion starts with these.
pub fn boilerplate_fields() -> Vec<Field> {
    vec![
        Field::new("id", "uuid")
            .primary_key()
            .required()
            .describe("Identificador único"),
        Field::new("created_at", "timestamp")
            .required()
            .describe("Data de criação"),
        Field::new("updated_at", "timestamp")
            .required()
            .describe("Data de atualização"),
    ]
}

fn normalize_table_name(table_name: &str) -> String {
    table_name.to_lowercase().replace('_', "")
}

/// Boilerplate fields followed by the fields of the first matching rule.
pub fn suggest_fields(table_name: &str) -> Vec<Field> {
    let normalized = normalize_table_name(table_name);
    let mut fields = boilerplate_fields();

    if let Some(rule) = RULES.iter().find(|rule| rule.matches(&normalized)) {
        fields.extend((rule.fields)());
    }

    fields
}

const INDEXED_NAME_PARTS: [&str; 3] = ["email", "nome", "codigo"];

/// One btree index per foreign-key field and per field whose name contains
/// `email`, `nome` or `codigo`. A field never gets more than one index;
/// only `email` indexes are unique.
pub fn suggest_indexes(fields: &[Field]) -> Vec<Index> {
    fields
        .iter()
        .filter(|field| {
            field.foreign_target().is_some()
                || INDEXED_NAME_PARTS.iter().any(|part| field.name.contains(part))
        })
        .map(|field| Index {
            name: format!("idx_{}", field.name),
            fields: vec![field.name.clone()],
            index_type: IndexType::Btree,
            unique: field.name.contains("email"),
        })
        .collect()
}

/// One `foreign_key` constraint per foreign-key field and one `unique`
/// constraint per field named exactly `email` or `codigo`.
pub fn suggest_constraints(fields: &[Field]) -> Vec<Constraint> {
    let mut constraints = Vec::new();

    for field in fields {
        if let Some(target) = field.foreign_target() {
            constraints.push(Constraint {
                name: format!("fk_{}", field.name),
                constraint_type: ConstraintType::ForeignKey,
                definition: format!("{} REFERENCES {}({})", field.name, target.table, target.field),
            });
        }
    }

    for field in fields {
        if field.name == "email" || field.name == "codigo" {
            constraints.push(Constraint {
                name: format!("uk_{}", field.name),
                constraint_type: ConstraintType::Unique,
                definition: field.name.clone(),
            });
        }
    }

    constraints
}

/// A complete suggestion for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub fields: Vec<Field>,
    pub indexes: Vec<Index>,
    pub constraints: Vec<Constraint>,
}

/// Suggest fields first, then derive indexes and constraints from them.
pub fn suggest(table_name: &str) -> Suggestion {
    let fields = suggest_fields(table_name);
    let indexes = suggest_indexes(&fields);
    let constraints = suggest_constraints(&fields);
    Suggestion {
        fields,
        indexes,
        constraints,
    }
}
