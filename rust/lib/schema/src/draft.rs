use serde::{Deserialize, Serialize};
use stagehand_kv::KVStore;

use crate::error::SchemaError;
use crate::model::Schema;

const PREFIX: &str = "draft:";

/// Stored form of a draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub schema: Schema,
    pub saved_at: String,
}

/// Named schema drafts kept in a [`KVStore`] under `draft:<name>`.
pub struct DraftStore<'a> {
    kv: &'a dyn KVStore,
}

impl<'a> DraftStore<'a> {
    pub fn new(kv: &'a dyn KVStore) -> Self {
        Self { kv }
    }

    fn key(name: &str) -> Result<String, SchemaError> {
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyDraftName);
        }
        Ok(format!("{}{}", PREFIX, name))
    }

    pub fn save(&self, name: &str, schema: &Schema) -> Result<(), SchemaError> {
        let record = DraftRecord {
            schema: schema.clone(),
            saved_at: stagehand_core::now_rfc3339(),
        };
        let bytes = serde_json::to_vec(&record)?;
        self.kv.set(&Self::key(name)?, &bytes)?;
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<Option<Schema>, SchemaError> {
        Ok(self.load_record(name)?.map(|record| record.schema))
    }

    pub fn load_record(&self, name: &str) -> Result<Option<DraftRecord>, SchemaError> {
        match self.kv.get(&Self::key(name)?)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn remove(&self, name: &str) -> Result<(), SchemaError> {
        self.kv.delete(&Self::key(name)?)?;
        Ok(())
    }

    /// Draft names, sorted.
    pub fn list(&self) -> Result<Vec<String>, SchemaError> {
        Ok(self
            .kv
            .scan(PREFIX)?
            .into_iter()
            .filter_map(|(key, _)| key.strip_prefix(PREFIX).map(str::to_string))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use stagehand_kv::MemoryStore;

    use super::*;
    use crate::suggest::suggest_fields;

    #[test]
    fn save_load_remove() {
        let kv = MemoryStore::new();
        let drafts = DraftStore::new(&kv);
        let schema = Schema {
            page_title: "Usuários".into(),
            table_name: "usuarios".into(),
            fields: suggest_fields("usuarios"),
            ..Default::default()
        };

        drafts.save("usuarios", &schema).unwrap();
        assert_eq!(drafts.load("usuarios").unwrap(), Some(schema));
        assert!(drafts.load_record("usuarios").unwrap().unwrap().saved_at.contains('T'));

        drafts.remove("usuarios").unwrap();
        assert_eq!(drafts.load("usuarios").unwrap(), None);
    }

    #[test]
    fn list_only_drafts() {
        let kv = MemoryStore::new();
        kv.set("other:x", b"{}").unwrap();
        let drafts = DraftStore::new(&kv);
        drafts.save("b", &Schema::default()).unwrap();
        drafts.save("a", &Schema::default()).unwrap();
        assert_eq!(drafts.list().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn empty_name_rejected() {
        let kv = MemoryStore::new();
        let drafts = DraftStore::new(&kv);
        assert!(matches!(
            drafts.save(" ", &Schema::default()),
            Err(SchemaError::EmptyDraftName)
        ));
    }

    #[test]
    fn corrupt_value_is_serialization_error() {
        let kv = MemoryStore::new();
        kv.set("draft:bad", b"not json").unwrap();
        let drafts = DraftStore::new(&kv);
        assert!(matches!(drafts.load("bad"), Err(SchemaError::Serialization(_))));
    }
}
