//! `stagehand draft save|load|list|rm`: named schema drafts in the local
//! redb database.

use std::path::Path;

use anyhow::Result;
use stagehand_kv::RedbStore;
use stagehand_schema::{DraftStore, Schema};

pub fn open_store(db_path: &Path) -> Result<RedbStore> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    RedbStore::open(db_path).map_err(|e| anyhow::anyhow!("failed to open draft store: {}", e))
}

/// Load a draft or fail with a readable message.
pub fn require(db_path: &Path, name: &str) -> Result<Schema> {
    let kv = open_store(db_path)?;
    DraftStore::new(&kv)
        .load(name)?
        .ok_or_else(|| anyhow::anyhow!("Draft \"{}\" not found.", name))
}

pub fn store(db_path: &Path, name: &str, schema: &Schema) -> Result<()> {
    let kv = open_store(db_path)?;
    DraftStore::new(&kv).save(name, schema)?;
    Ok(())
}

pub fn save(db_path: &Path, name: &str, file: &Path) -> Result<()> {
    let schema = super::read_schema(file)?;
    store(db_path, name, &schema)?;
    println!("Draft \"{}\" saved.", name);
    Ok(())
}

pub fn load(db_path: &Path, name: &str) -> Result<()> {
    let schema = require(db_path, name)?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

pub fn list(db_path: &Path) -> Result<()> {
    let kv = open_store(db_path)?;
    let names = DraftStore::new(&kv).list()?;
    if names.is_empty() {
        println!("No drafts.");
        return Ok(());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

pub fn remove(db_path: &Path, name: &str) -> Result<()> {
    let kv = open_store(db_path)?;
    DraftStore::new(&kv).remove(name)?;
    println!("Draft \"{}\" removed.", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("data/drafts.redb");
        let file = dir.path().join("schema.json");
        std::fs::write(
            &file,
            r#"{"pageTitle":"Clientes","tableName":"clientes","fields":[{"name":"nome","type":"text"}]}"#,
        )
        .unwrap();

        save(&db, "clientes", &file).unwrap();
        let schema = require(&db, "clientes").unwrap();
        assert_eq!(schema.table_name, "clientes");
        assert_eq!(schema.fields.len(), 1);

        remove(&db, "clientes").unwrap();
        let err = require(&db, "clientes").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
