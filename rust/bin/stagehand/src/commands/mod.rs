pub mod draft;
pub mod fields;
pub mod generate;
pub mod schema;

use std::path::Path;

use stagehand_schema::Schema;

/// Read a schema JSON file (the same shape the editor saves).
pub fn read_schema(path: &Path) -> anyhow::Result<Schema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let schema: Schema = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid schema in {}: {}", path.display(), e))?;
    Ok(schema)
}
