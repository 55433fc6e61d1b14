//! `stagehand fields clear|generate`: edit a draft's field list through
//! the schema builder.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use stagehand_schema::{AssistOutcome, FieldAssistant, HttpFieldAssistant, SchemaBuilder};

/// Wipe the fields of draft `name` if `confirm` (given the field count)
/// agrees. Returns whether the draft changed.
pub fn clear(db_path: &Path, name: &str, confirm: impl FnOnce(usize) -> bool) -> Result<bool> {
    let mut builder = SchemaBuilder::from_schema(super::draft::require(db_path, name)?);
    if !builder.remove_all_fields(confirm) {
        println!("Cancelled.");
        return Ok(false);
    }
    super::draft::store(db_path, name, builder.schema())?;
    println!("Fields of \"{}\" removed.", name);
    Ok(true)
}

/// Ask the field assistant at `assistant_url` for the fields of draft
/// `name`, then save the draft back.
pub async fn generate(
    db_path: &Path,
    name: &str,
    context: &str,
    assistant_url: &str,
    timeout: Duration,
) -> Result<()> {
    if assistant_url.is_empty() {
        anyhow::bail!("No assistant_url configured in the client config.");
    }
    let assistant = HttpFieldAssistant::with_timeout(assistant_url, timeout);
    generate_with(db_path, name, context, &assistant).await
}

async fn generate_with(
    db_path: &Path,
    name: &str,
    context: &str,
    assistant: &dyn FieldAssistant,
) -> Result<()> {
    let mut builder = SchemaBuilder::from_schema(super::draft::require(db_path, name)?);
    match builder.generate_with_assistant(assistant, context).await {
        AssistOutcome::Generated { fields } => println!("{} fields generated.", fields),
        AssistOutcome::Fallback { message } => eprintln!("{}", message),
    }
    super::draft::store(db_path, name, builder.schema())?;
    Ok(())
}
