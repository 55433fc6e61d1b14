use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadOnlyTable, Table, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

/// Every key lives in one table; drafts are told apart by their `draft:` prefix.
const ENTRIES: TableDefinition<&str, &[u8]> = TableDefinition::new("entries");

type Entries<'txn> = Table<'txn, &'static str, &'static [u8]>;
type EntriesView = ReadOnlyTable<&'static str, &'static [u8]>;

fn storage(e: impl std::fmt::Display) -> KVError {
    KVError::Storage(e.to_string())
}

/// KVStore on a redb file. Drafts survive restarts of both binaries.
///
/// Each call is its own transaction, so a failed `set` leaves the previous
/// value in place.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open the database at `path`, creating the file and its table on first use.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let store = Self {
            db: Arc::new(Database::create(path).map_err(storage)?),
        };
        store.write(|_| Ok(()))?;
        debug!(path = %path.display(), "opened draft database");
        Ok(store)
    }

    fn read<T>(&self, f: impl FnOnce(&EntriesView) -> Result<T, KVError>) -> Result<T, KVError> {
        let txn = self.db.begin_read().map_err(storage)?;
        let table = txn.open_table(ENTRIES).map_err(storage)?;
        f(&table)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Entries<'_>) -> Result<T, KVError>) -> Result<T, KVError> {
        let txn = self.db.begin_write().map_err(storage)?;
        let out = {
            let mut table = txn.open_table(ENTRIES).map_err(storage)?;
            f(&mut table)?
        };
        txn.commit().map_err(storage)?;
        Ok(out)
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        self.read(|table| {
            let value = table.get(key).map_err(storage)?;
            Ok(value.map(|v| v.value().to_vec()))
        })
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.write(|table| {
            table.insert(key, value).map_err(storage)?;
            Ok(())
        })
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        self.write(|table| {
            table.remove(key).map_err(storage)?;
            Ok(())
        })
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        self.read(|table| {
            let mut found = Vec::new();
            for entry in table.range(prefix..).map_err(storage)? {
                let (key, value) = entry.map_err(storage)?;
                let key = key.value();
                if !key.starts_with(prefix) {
                    break;
                }
                found.push((key.to_string(), value.value().to_vec()));
            }
            Ok(found)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (RedbStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("drafts.redb")).unwrap();
        (store, dir)
    }

    #[test]
    fn set_get_delete() {
        let (store, _dir) = open_temp();
        assert_eq!(store.get("draft:a").unwrap(), None);

        store.set("draft:a", b"one").unwrap();
        assert_eq!(store.get("draft:a").unwrap(), Some(b"one".to_vec()));

        store.set("draft:a", b"two").unwrap();
        assert_eq!(store.get("draft:a").unwrap(), Some(b"two".to_vec()));

        store.delete("draft:a").unwrap();
        assert_eq!(store.get("draft:a").unwrap(), None);
    }

    #[test]
    fn scan_stops_at_prefix_boundary() {
        let (store, _dir) = open_temp();
        store.set("draft:b", b"2").unwrap();
        store.set("draft:a", b"1").unwrap();
        store.set("drafts", b"x").unwrap();
        store.set("other:a", b"y").unwrap();

        let keys: Vec<String> = store
            .scan("draft:")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["draft:a", "draft:b"]);
    }

    #[test]
    fn reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drafts.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.set("draft:keep", b"yes").unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.get("draft:keep").unwrap(), Some(b"yes".to_vec()));
    }

    #[test]
    fn delete_missing_is_noop() {
        let (store, _dir) = open_temp();
        store.delete("draft:ghost").unwrap();
        assert!(store.scan("").unwrap().is_empty());
    }

    #[test]
    fn open_on_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        match RedbStore::open(dir.path()) {
            Err(KVError::Storage(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("opened a directory as a database"),
        }
    }
}
