use stagehand_kv::KVError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("field index {index} out of range (schema has {len} fields)")]
    FieldIndexOutOfRange { index: usize, len: usize },

    #[error("index {index} out of range (list has {len} entries)")]
    EntryIndexOutOfRange { index: usize, len: usize },

    #[error("draft name must not be empty")]
    EmptyDraftName,

    #[error("storage error: {0}")]
    Storage(#[from] KVError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
