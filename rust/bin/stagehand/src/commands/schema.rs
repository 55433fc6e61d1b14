//! `stagehand suggest` and `stagehand sql`.

use std::path::Path;

use anyhow::Result;
use stagehand_schema::{Field, Suggestion};

/// Print suggested fields, indexes and constraints for `table`.
pub fn suggest(table: &str, output_json: bool) -> Result<()> {
    let table = table.trim();
    if table.is_empty() {
        anyhow::bail!("Table name cannot be empty.");
    }
    let suggestion = stagehand_schema::suggest(table);
    if output_json {
        println!("{}", serde_json::to_string_pretty(&suggestion)?);
    } else {
        print!("{}", render_suggestion(&suggestion));
    }
    Ok(())
}

fn render_suggestion(suggestion: &Suggestion) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<20} {:<16} {}\n", "FIELD", "TYPE", "FLAGS"));
    for field in &suggestion.fields {
        out.push_str(&format!(
            "{:<20} {:<16} {}\n",
            field.name,
            field.sql_type,
            flags(field)
        ));
    }
    if !suggestion.indexes.is_empty() {
        out.push_str("\nIndexes:\n");
        for index in &suggestion.indexes {
            out.push_str(&format!("  {} ({})\n", index.name, index.fields.join(", ")));
        }
    }
    if !suggestion.constraints.is_empty() {
        out.push_str("\nConstraints:\n");
        for constraint in &suggestion.constraints {
            out.push_str(&format!("  {}\n", constraint.name));
        }
    }
    out
}

fn flags(field: &Field) -> String {
    let mut flags = Vec::new();
    if field.is_primary_key {
        flags.push("pk".to_string());
    }
    if field.required {
        flags.push("required".to_string());
    }
    if let Some(target) = field.foreign_target() {
        flags.push(format!("-> {}.{}", target.table, target.field));
    }
    flags.join(" ")
}

/// Print the DDL for the schema in `file`.
pub fn sql(file: &Path) -> Result<()> {
    let schema = super::read_schema(file)?;
    let ddl = schema.sql();
    if ddl.is_empty() {
        anyhow::bail!("Schema needs a table name and at least one field.");
    }
    println!("{}", ddl);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_produtos() {
        let out = render_suggestion(&stagehand_schema::suggest("produtos"));
        assert!(out.starts_with("FIELD"));
        assert!(out.contains("id"));
        assert!(out.contains("pk required"));
        assert!(out.contains("-> categorias.id"));
        assert!(out.contains("Indexes:"));
    }

    #[test]
    fn sql_rejects_empty_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(sql(&path).is_err());
        assert!(suggest(" ", false).is_err());
    }
}
